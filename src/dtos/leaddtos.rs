use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequestDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(max = 50, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Please tell us if you are buying or selling"))]
    pub buyer_or_seller: String,

    pub budget: Option<String>,
    pub preferred_areas: Option<String>,
    pub type_of_home: Option<String>,
    pub timeline: Option<String>,
    pub locale: Option<String>,
}

/// Wire contract of the lead endpoint: validation failures are the only
/// hard errors. Everything downstream degrades into `warnings` and the
/// submitter still sees success.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitPortfolioResponse {
    pub success: bool,
    pub id: Option<Uuid>,
    pub warnings: Vec<String>,
}
