//! Machine-readable API documentation.
//!
//! Every route the server registers is annotated once in [`endpoints`].
//! The OpenAPI 3.0 document served at `GET /api/docs/openapi.json` and the
//! HTML page at `GET /api/docs` are both generated from that table, so the
//! two renderings cannot drift apart.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
}

/// A documented request parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamDoc {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
    /// JSON Schema primitive type (`"integer"`, `"string"`).
    pub schema_type: &'static str,
    pub description: &'static str,
}

/// The shape of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Body {
    Contact,
    ContactList,
    NewContact,
    ContactPatch,
    Health,
    OpenApi,
    Html,
    Text,
    Empty,
}

/// A documented response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseDoc {
    pub status: u16,
    pub description: &'static str,
    pub body: Body,
}

/// Annotation for one route.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointDoc {
    /// Uppercase HTTP method.
    pub method: &'static str,
    /// Route path using `{param}` placeholders.
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub params: Vec<ParamDoc>,
    pub request_body: Option<Body>,
    pub responses: Vec<ResponseDoc>,
}

fn id_param() -> ParamDoc {
    ParamDoc {
        name: "id",
        location: ParamLocation::Path,
        required: true,
        schema_type: "integer",
        description: "Contact id. Values that are not integers are treated as unknown ids.",
    }
}

fn not_found() -> ResponseDoc {
    ResponseDoc {
        status: 404,
        description: "Contact not found.",
        body: Body::Text,
    }
}

/// Annotations for every route served by [`crate::server`].
pub fn endpoints() -> Vec<EndpointDoc> {
    vec![
        EndpointDoc {
            method: "GET",
            path: "/api/contacts",
            operation_id: "listContacts",
            summary: "List contacts, optionally filtered by a case-insensitive substring query",
            tag: "contacts",
            params: vec![ParamDoc {
                name: "q",
                location: ParamLocation::Query,
                required: false,
                schema_type: "string",
                description: "Matched against firstName, lastName, email and tag",
            }],
            request_body: None,
            responses: vec![ResponseDoc {
                status: 200,
                description: "Matching contacts in insertion order",
                body: Body::ContactList,
            }],
        },
        EndpointDoc {
            method: "POST",
            path: "/api/contacts",
            operation_id: "createContact",
            summary: "Create a contact",
            tag: "contacts",
            params: vec![],
            request_body: Some(Body::NewContact),
            responses: vec![
                ResponseDoc {
                    status: 201,
                    description: "The created contact",
                    body: Body::Contact,
                },
                ResponseDoc {
                    status: 400,
                    description: "First Name and Email are required.",
                    body: Body::Text,
                },
                ResponseDoc {
                    status: 500,
                    description: "No contact ids left to assign.",
                    body: Body::Text,
                },
            ],
        },
        EndpointDoc {
            method: "GET",
            path: "/api/contacts/{id}",
            operation_id: "getContact",
            summary: "Fetch one contact",
            tag: "contacts",
            params: vec![id_param()],
            request_body: None,
            responses: vec![
                ResponseDoc {
                    status: 200,
                    description: "The contact",
                    body: Body::Contact,
                },
                not_found(),
            ],
        },
        EndpointDoc {
            method: "PUT",
            path: "/api/contacts/{id}",
            operation_id: "updateContact",
            summary: "Update the supplied non-empty fields of a contact",
            tag: "contacts",
            params: vec![id_param()],
            request_body: Some(Body::ContactPatch),
            responses: vec![
                ResponseDoc {
                    status: 200,
                    description: "The updated contact",
                    body: Body::Contact,
                },
                ResponseDoc {
                    status: 400,
                    description: "At least one field is required for update.",
                    body: Body::Text,
                },
                not_found(),
            ],
        },
        EndpointDoc {
            method: "DELETE",
            path: "/api/contacts/{id}",
            operation_id: "deleteContact",
            summary: "Delete a contact",
            tag: "contacts",
            params: vec![id_param()],
            request_body: None,
            responses: vec![
                ResponseDoc {
                    status: 204,
                    description: "Deleted",
                    body: Body::Empty,
                },
                not_found(),
            ],
        },
        EndpointDoc {
            method: "GET",
            path: "/health",
            operation_id: "health",
            summary: "Health check",
            tag: "meta",
            params: vec![],
            request_body: None,
            responses: vec![ResponseDoc {
                status: 200,
                description: "Server status and version",
                body: Body::Health,
            }],
        },
        EndpointDoc {
            method: "GET",
            path: "/api/docs/openapi.json",
            operation_id: "openApiDocument",
            summary: "This OpenAPI document",
            tag: "meta",
            params: vec![],
            request_body: None,
            responses: vec![ResponseDoc {
                status: 200,
                description: "OpenAPI 3.0 document",
                body: Body::OpenApi,
            }],
        },
        EndpointDoc {
            method: "GET",
            path: "/api/docs",
            operation_id: "apiDocsPage",
            summary: "Human-readable API reference",
            tag: "meta",
            params: vec![],
            request_body: None,
            responses: vec![ResponseDoc {
                status: 200,
                description: "HTML page",
                body: Body::Html,
            }],
        },
    ]
}

fn contact_field_properties() -> Value {
    json!({
        "firstName": { "type": "string" },
        "lastName": { "type": "string" },
        "email": { "type": "string" },
        "phone": { "type": "string" },
        "tag": { "type": "string" }
    })
}

fn component_schemas() -> Value {
    let mut contact_props = contact_field_properties();
    if let Some(props) = contact_props.as_object_mut() {
        props.insert(
            "id".to_string(),
            json!({ "type": "integer", "format": "int64" }),
        );
    }

    json!({
        "Contact": {
            "type": "object",
            "properties": contact_props,
            "required": ["id", "firstName", "lastName", "email", "phone", "tag"]
        },
        "NewContact": {
            "type": "object",
            "description": "lastName and phone default to \"\", tag defaults to \"General\".",
            "properties": contact_field_properties(),
            "required": ["firstName", "email"]
        },
        "ContactPatch": {
            "type": "object",
            "description": "At least one non-empty field. Empty strings leave the stored value unchanged.",
            "properties": contact_field_properties()
        },
        "Health": {
            "type": "object",
            "properties": {
                "status": { "type": "string" },
                "version": { "type": "string" }
            },
            "required": ["status", "version"]
        }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn body_content(body: Body) -> Option<Value> {
    let content = match body {
        Body::Contact => json!({ "application/json": { "schema": schema_ref("Contact") } }),
        Body::ContactList => json!({
            "application/json": { "schema": { "type": "array", "items": schema_ref("Contact") } }
        }),
        Body::NewContact => json!({ "application/json": { "schema": schema_ref("NewContact") } }),
        Body::ContactPatch => {
            json!({ "application/json": { "schema": schema_ref("ContactPatch") } })
        }
        Body::Health => json!({ "application/json": { "schema": schema_ref("Health") } }),
        Body::OpenApi => json!({ "application/json": { "schema": { "type": "object" } } }),
        Body::Html => json!({ "text/html": { "schema": { "type": "string" } } }),
        Body::Text => json!({ "text/plain": { "schema": { "type": "string" } } }),
        Body::Empty => return None,
    };
    Some(content)
}

fn operation(endpoint: &EndpointDoc) -> Value {
    let mut op = Map::new();
    op.insert("operationId".into(), json!(endpoint.operation_id));
    op.insert("summary".into(), json!(endpoint.summary));
    op.insert("tags".into(), json!([endpoint.tag]));

    if !endpoint.params.is_empty() {
        let params: Vec<Value> = endpoint
            .params
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": p.location,
                    "required": p.required,
                    "description": p.description,
                    "schema": { "type": p.schema_type }
                })
            })
            .collect();
        op.insert("parameters".into(), Value::Array(params));
    }

    if let Some(content) = endpoint.request_body.and_then(body_content) {
        op.insert(
            "requestBody".into(),
            json!({ "required": true, "content": content }),
        );
    }

    let mut responses = Map::new();
    for r in &endpoint.responses {
        let mut resp = Map::new();
        resp.insert("description".into(), json!(r.description));
        if let Some(content) = body_content(r.body) {
            resp.insert("content".into(), content);
        }
        responses.insert(r.status.to_string(), Value::Object(resp));
    }
    op.insert("responses".into(), Value::Object(responses));

    Value::Object(op)
}

/// Builds the OpenAPI 3.0 document for every annotated route.
pub fn openapi_document() -> Value {
    let mut paths: Map<String, Value> = Map::new();
    for endpoint in endpoints() {
        let item = paths
            .entry(endpoint.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = item {
            methods.insert(endpoint.method.to_lowercase(), operation(&endpoint));
        }
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Contact Directory API",
            "description": "Create, read, update, delete and search contacts.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": paths,
        "components": { "schemas": component_schemas() }
    })
}

/// Renders the endpoint table as a standalone HTML page.
pub fn render_html() -> String {
    let mut rows = String::new();
    for e in endpoints() {
        let params = e
            .params
            .iter()
            .map(|p| {
                format!(
                    "<code>{}</code> ({}{})",
                    p.name,
                    match p.location {
                        ParamLocation::Path => "path",
                        ParamLocation::Query => "query",
                    },
                    if p.required { ", required" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("<br>");
        let responses = e
            .responses
            .iter()
            .map(|r| format!("<b>{}</b> {}", r.status, r.description))
            .collect::<Vec<_>>()
            .join("<br>");
        rows.push_str(&format!(
            "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            e.method, e.path, e.summary, params, responses
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Contact Directory API</title></head>\n<body>\n\
         <h1>Contact Directory API <small>v{}</small></h1>\n\
         <p>Machine-readable form: <a href=\"/api/docs/openapi.json\">/api/docs/openapi.json</a></p>\n\
         <table border=\"1\" cellpadding=\"4\">\n\
         <tr><th>Method</th><th>Path</th><th>Summary</th><th>Parameters</th><th>Responses</th></tr>\n\
         {}</table>\n</body>\n</html>\n",
        env!("CARGO_PKG_VERSION"),
        rows
    )
}
