use callscope_db::goals::models::ScorecardParameterDef;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "scorecardparameters")]
    pub scorecard_parameters: Vec<ScorecardParameterDef>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "scorecardparameters")]
    pub scorecard_parameters: Option<Vec<ScorecardParameterDef>>,
}
