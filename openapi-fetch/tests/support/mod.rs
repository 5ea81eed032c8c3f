//! Routes for a small pet store API, written the way a schema generator
//! would emit them.
#![allow(dead_code)]

use openapi_fetch::{
    ApiResponse, CodecError, FromApiResponse, HttpMethod, Json, NoBody, Route, RouteSchema,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPet {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
}

// GET /pets

#[derive(Debug, Default, Serialize)]
pub struct ListPetsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ListPetsHeader {
    #[serde(rename = "X-Request-Id", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub enum ListPetsResponse {
    Ok {
        pets: Vec<Pet>,
        next: Option<String>,
    },
    Unknown(ApiResponse),
}

impl FromApiResponse for ListPetsResponse {
    fn from_api_response(response: ApiResponse) -> Result<Self, CodecError> {
        match response.status {
            200 => {
                let next = response.header("x-next").map(str::to_string);
                Ok(Self::Ok {
                    pets: response.json()?,
                    next,
                })
            }
            _ => Ok(Self::Unknown(response)),
        }
    }
}

pub struct ListPets;

impl Route for ListPets {
    const PATH: &'static str = "/pets";
    const METHOD: HttpMethod = HttpMethod::Get;
    type Path = ();
    type Query = ListPetsQuery;
    type Header = ListPetsHeader;
    type Body = NoBody;
    type Response = ListPetsResponse;
}

// POST /pets

#[derive(Debug)]
pub enum CreatePetResponse {
    Created(Pet),
    Unknown(ApiResponse),
}

impl FromApiResponse for CreatePetResponse {
    fn from_api_response(response: ApiResponse) -> Result<Self, CodecError> {
        match response.status {
            201 => Ok(Self::Created(response.json()?)),
            _ => Ok(Self::Unknown(response)),
        }
    }
}

pub struct CreatePet;

impl Route for CreatePet {
    const PATH: &'static str = "/pets";
    const METHOD: HttpMethod = HttpMethod::Post;
    type Path = ();
    type Query = ();
    type Header = ();
    type Body = Json<NewPet>;
    type Response = CreatePetResponse;
}

// GET /pets/{petId}

#[derive(Debug, Serialize)]
pub struct GetPetPath {
    #[serde(rename = "petId")]
    pub pet_id: u64,
}

#[derive(Debug)]
pub enum GetPetResponse {
    Ok(Pet),
    NotFound(ErrorBody),
    Unknown(ApiResponse),
}

impl FromApiResponse for GetPetResponse {
    fn from_api_response(response: ApiResponse) -> Result<Self, CodecError> {
        match response.status {
            200 => Ok(Self::Ok(response.json()?)),
            404 => Ok(Self::NotFound(response.json()?)),
            _ => Ok(Self::Unknown(response)),
        }
    }
}

pub struct GetPet;

impl Route for GetPet {
    const PATH: &'static str = "/pets/{petId}";
    const METHOD: HttpMethod = HttpMethod::Get;
    type Path = GetPetPath;
    type Query = ();
    type Header = ();
    type Body = NoBody;
    type Response = GetPetResponse;
}

pub const PETSTORE_SCHEMA: &str = r#"
/pets:
  get:
    parameters:
      - { name: limit, in: query, type: integer }
      - { name: status, in: query, type: string }
      - { name: X-Request-Id, in: header, type: string }
    responses:
      "200":
        content: ["application/json; charset=utf-8"]
        headers: [x-next]
  post:
    requestBody:
      required: true
      content: ["application/json"]
    responses:
      "201": { content: ["application/json; charset=utf-8"] }
/pets/{petId}:
  get:
    parameters:
      - { name: petId, in: path, required: true, type: integer }
    responses:
      "200": { content: ["application/json; charset=utf-8"] }
      "404": { content: ["application/json; charset=utf-8"] }
"#;

pub fn petstore_schema() -> RouteSchema {
    RouteSchema::from_yaml(PETSTORE_SCHEMA).expect("petstore schema parses")
}
