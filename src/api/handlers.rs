use axum::extract::State;
use axum::response::{Html, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// API Documentation handlers
pub async fn get_api_docs<S: Store>(_state: State<AppState<S>>) -> Html<String> {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Depot Lifecycle API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        html {
            box-sizing: border-box;
            overflow: -moz-scrollbars-vertical;
            overflow-y: scroll;
        }
        *, *:before, *:after {
            box-sizing: inherit;
        }
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            const ui = SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;
    Html(html.to_string())
}

pub async fn get_openapi_spec<S: Store>(_state: State<AppState<S>>) -> Json<serde_json::Value> {
    let spec = serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Depot Lifecycle API",
            "version": "2.0.0",
            "description": "Container-depot lifecycle management: search, create, and update Release and Estimate records with nested party persistence.",
            "contact": {
                "name": "API Support"
            }
        },
        "servers": [
            {
                "url": "/",
                "description": "Current server"
            }
        ],
        "tags": [
            {
                "name": "release",
                "description": "Records authorizing equipment to leave a depot"
            },
            {
                "name": "estimate",
                "description": "Damage/repair cost assessments tied to a revision number"
            }
        ],
        "paths": {
            "/api/v2/release": {
                "get": {
                    "tags": ["release"],
                    "operationId": "indexRelease",
                    "summary": "search for a release",
                    "description": "Finds Releases for the given the criteria.",
                    "parameters": [
                        {
                            "name": "releaseNumber",
                            "in": "query",
                            "required": false,
                            "description": "the release number to filter to",
                            "schema": {"type": "string", "maxLength": 16, "example": "RHAMG000000"}
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "successful search",
                            "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/Release"}}}}
                        },
                        "400": {"$ref": "#/components/responses/BadRequest"},
                        "404": {"description": "no releases were found"}
                    }
                },
                "post": {
                    "tags": ["release"],
                    "operationId": "saveRelease",
                    "summary": "create release",
                    "description": "Creates a Release for the given criteria.",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Release"}}}
                    },
                    "responses": {
                        "200": {"description": "successful create"},
                        "400": {"$ref": "#/components/responses/BadRequest"}
                    }
                }
            },
            "/api/v2/release/{releaseNumber}": {
                "put": {
                    "tags": ["release"],
                    "operationId": "updateRelease",
                    "summary": "update release",
                    "description": "Updates an existing Release.",
                    "parameters": [
                        {
                            "name": "releaseNumber",
                            "in": "path",
                            "required": true,
                            "schema": {"type": "string", "maxLength": 16, "example": "RHAMG000000"}
                        }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Release"}}}
                    },
                    "responses": {
                        "200": {"description": "successful update"},
                        "400": {"$ref": "#/components/responses/BadRequest"}
                    }
                }
            },
            "/api/v2/estimate": {
                "get": {
                    "tags": ["estimate"],
                    "operationId": "indexEstimate",
                    "summary": "search for estimate(s)",
                    "description": "Given search criteria, return estimates that match that criteria.",
                    "parameters": [
                        {"name": "estimateNumber", "in": "query", "schema": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"}},
                        {"name": "unitNumber", "in": "query", "schema": {"type": "string", "maxLength": 11, "pattern": "^[A-Z]{4}[X0-9]{6}[A-Z0-9]{0,1}$", "example": "CONU1234561"}},
                        {"name": "depot", "in": "query", "schema": {"type": "string", "maxLength": 9, "pattern": "^[A-Z0-9]{9}$", "example": "DEHAMCMRA"}},
                        {"name": "lessee", "in": "query", "schema": {"type": "string", "maxLength": 9, "pattern": "^[A-Z0-9]{9}$", "example": "SGSINONEA"}},
                        {"name": "revision", "in": "query", "schema": {"type": "integer", "format": "int32", "example": 0}},
                        {"name": "equipmentCode", "in": "query", "schema": {"type": "string", "maxLength": 10, "example": "22G1"}}
                    ],
                    "responses": {
                        "501": {"description": "this feature is not supported by this server"}
                    }
                },
                "post": {
                    "tags": ["estimate"],
                    "operationId": "saveEstimate",
                    "summary": "create an estimate revision",
                    "description": "Create a damage estimate or a revision to an existing estimate that documents the type of damage and the cost of the repairs.",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Estimate"}}}
                    },
                    "responses": {
                        "200": {
                            "description": "successfully created and accepted the estimate revision",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/EstimateAllocation"}}}
                        },
                        "400": {"$ref": "#/components/responses/BadRequest"}
                    }
                }
            },
            "/api/v2/estimate/{estimateNumber}": {
                "get": {
                    "tags": ["estimate"],
                    "operationId": "showEstimate",
                    "summary": "fetch an estimate revision",
                    "description": "Finds an estimate by the given estimate number and depot, returning the revision specified. If revision is not specified, the current estimate revision is returned.",
                    "parameters": [
                        {"name": "estimateNumber", "in": "path", "required": true, "schema": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"}},
                        {"name": "depot", "in": "query", "required": true, "schema": {"type": "string", "maxLength": 9, "pattern": "^[A-Z0-9]{9}$", "example": "DEHAMCMRA"}},
                        {"name": "revision", "in": "query", "required": false, "schema": {"type": "integer", "format": "int32", "example": 0}}
                    ],
                    "responses": {
                        "501": {"description": "this feature is not supported by this server"}
                    }
                },
                "put": {
                    "tags": ["estimate"],
                    "operationId": "customerApproveEstimate",
                    "summary": "customer approve an estimate",
                    "description": "Instead of sending in a full estimate revision, this endpoint can be used to approve an estimate without revising it.",
                    "parameters": [
                        {"name": "estimateNumber", "in": "path", "required": true, "schema": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"}},
                        {"name": "depot", "in": "query", "required": true, "schema": {"type": "string", "maxLength": 9, "pattern": "^[A-Z0-9]{9}$", "example": "DEHAMCMRA"}}
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/EstimateCustomerApproval"}}}
                    },
                    "responses": {
                        "501": {"description": "this feature is not supported by this server"}
                    }
                },
                "patch": {
                    "tags": ["estimate"],
                    "operationId": "updateTotals",
                    "summary": "update estimate totals",
                    "description": "When the creation of the estimate is delayed, after the manual processing is complete, this method is called to perform the update of the totals.",
                    "parameters": [
                        {"name": "estimateNumber", "in": "path", "required": true, "schema": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"}}
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/EstimateAllocation"}}}
                    },
                    "responses": {
                        "200": {"description": "successfully received estimate totals"},
                        "400": {"$ref": "#/components/responses/BadRequest"}
                    }
                }
            }
        },
        "components": {
            "responses": {
                "BadRequest": {
                    "description": "an error occurred",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                }
            },
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "code": {"type": "string", "example": "ERR000"},
                        "message": {"type": "string"}
                    }
                },
                "Party": {
                    "type": "object",
                    "required": ["code"],
                    "properties": {
                        "code": {"type": "string", "maxLength": 9, "pattern": "^[A-Z0-9]{9}$", "example": "DEHAMCMRA"},
                        "name": {"type": "string"},
                        "city": {"type": "string"},
                        "country": {"type": "string"}
                    }
                },
                "Release": {
                    "type": "object",
                    "required": ["releaseNumber"],
                    "properties": {
                        "releaseNumber": {"type": "string", "maxLength": 16, "example": "RHAMG000000"},
                        "comments": {"type": "string"},
                        "depot": {"$ref": "#/components/schemas/Party"},
                        "recipient": {"$ref": "#/components/schemas/Party"},
                        "details": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "customer": {"$ref": "#/components/schemas/Party"},
                                    "contract": {"type": "string"},
                                    "equipment": {"type": "string", "example": "22G1"},
                                    "quantity": {"type": "integer", "format": "int32"}
                                }
                            }
                        }
                    }
                },
                "Estimate": {
                    "type": "object",
                    "required": ["estimateNumber"],
                    "properties": {
                        "estimateNumber": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"},
                        "revision": {"type": "integer", "format": "int32", "example": 0},
                        "unitNumber": {"type": "string", "maxLength": 11, "example": "CONU1234561"},
                        "equipmentCode": {"type": "string", "maxLength": 10, "example": "22G1"},
                        "depot": {"$ref": "#/components/schemas/Party"},
                        "requester": {"$ref": "#/components/schemas/Party"},
                        "owner": {"$ref": "#/components/schemas/Party"},
                        "customer": {"$ref": "#/components/schemas/Party"},
                        "total": {"type": "number", "format": "double"},
                        "comments": {"type": "string"},
                        "lineItems": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["party", "total"],
                                "properties": {
                                    "party": {"type": "string", "description": "responsible party role code: O owner, I insurance, U customer", "example": "O"},
                                    "total": {"type": "number", "format": "double"},
                                    "description": {"type": "string"}
                                }
                            }
                        },
                        "allocation": {"$ref": "#/components/schemas/EstimateAllocation"}
                    }
                },
                "EstimateAllocation": {
                    "type": "object",
                    "required": ["estimateNumber"],
                    "properties": {
                        "id": {"type": "string"},
                        "estimateNumber": {"type": "string", "maxLength": 16, "example": "DEHAMCE1856373"},
                        "revision": {"type": "integer", "format": "int32"},
                        "depot": {"$ref": "#/components/schemas/Party"},
                        "total": {"type": "number", "format": "double"},
                        "ownerTotal": {"type": "number", "format": "double"},
                        "insuranceTotal": {"type": "number", "format": "double"},
                        "customerTotal": {"type": "number", "format": "double"},
                        "ctl": {"type": "boolean", "description": "constructive total loss"},
                        "comments": {"type": "string"},
                        "preliminaryDecision": {
                            "type": "object",
                            "properties": {
                                "recommendation": {"type": "string", "example": "FIX"},
                                "reason": {"type": "string"}
                            }
                        }
                    }
                },
                "EstimateCustomerApproval": {
                    "type": "object",
                    "properties": {
                        "approvedBy": {"type": "string"},
                        "approvalDate": {"type": "string", "format": "date-time"},
                        "comments": {"type": "string"}
                    }
                }
            }
        }
    });

    Json(spec)
}
