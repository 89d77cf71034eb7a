//! Read-only case views.
//!
//! The case list, search, and client-details pages, plus the health probe.
//! These pages fetch from the case API and render; there is no form
//! pipeline involved.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::api::middleware::PortalError;
use crate::domain::CaseReference;
use crate::infrastructure::dependencies::AppDependencies;

/// Query parameters of the case list page.
#[derive(Debug, Deserialize)]
pub struct CaseListParams {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_sort")]
    sort: String,
}

const fn default_page() -> u32 {
    1
}

fn default_sort() -> String {
    "ascending".to_string()
}

/// Query parameters of the case search page.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
}

/// GET `/cases`: the paginated case list.
pub async fn list_cases(
    State(dependencies): State<AppDependencies>,
    Query(params): Query<CaseListParams>,
) -> Result<Html<String>, PortalError> {
    let envelope = dependencies
        .case_api()
        .get_cases(params.page, &params.sort)
        .await?;
    let data = envelope.data.unwrap_or(Value::Null);

    let mut context = Map::new();
    context.insert("heading".to_string(), json!("Your cases"));
    context.insert(
        "rows".to_string(),
        data.get("cases").cloned().unwrap_or_else(|| json!([])),
    );
    context.insert(
        "page".to_string(),
        data.get("page").cloned().unwrap_or_else(|| json!(params.page)),
    );

    let page = dependencies
        .renderer()
        .render("cases/list", &Value::Object(context))?;
    Ok(Html(page))
}

/// GET `/cases/search`: free-text case search.
pub async fn search_cases(
    State(dependencies): State<AppDependencies>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PortalError> {
    let envelope = dependencies.case_api().search_cases(&params.query).await?;
    let data = envelope.data.unwrap_or(Value::Null);

    let mut context = Map::new();
    context.insert("heading".to_string(), json!("Search results"));
    context.insert(
        "rows".to_string(),
        data.get("results").cloned().unwrap_or_else(|| json!([])),
    );
    context.insert("searchTerm".to_string(), json!(params.query));

    let page = dependencies
        .renderer()
        .render("cases/search", &Value::Object(context))?;
    Ok(Html(page))
}

/// GET `/cases/{caseReference}/client-details`: the read-only details page
/// every successful edit redirects back to.
pub async fn client_details(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    let reference = CaseReference::parse(&case_reference)?;
    let envelope = dependencies.case_api().get_client_details(&reference).await?;
    if !envelope.is_success() {
        return Err(PortalError::CaseNotFound(reference.to_string()));
    }
    let record = envelope.data.unwrap_or(Value::Null);

    // Nested blocks (thirdParty, clientSupportNeeds) flatten to dotted
    // keys so every edited slice shows up on the page.
    let mut fields = Map::new();
    flatten_record("", &record, &mut fields);

    let mut context = Map::new();
    context.insert("heading".to_string(), json!("Client details"));
    context.insert("caseReference".to_string(), json!(reference.to_string()));
    context.insert("fields".to_string(), Value::Object(fields));

    let page = dependencies
        .renderer()
        .render("case_details/view", &Value::Object(context))?;
    Ok(Html(page))
}

/// GET `/health`: liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Flattens a record's string leaves into dotted display keys.
fn flatten_record(prefix: &str, value: &Value, fields: &mut Map<String, Value>) {
    match value {
        Value::Object(object) => {
            for (key, nested) in object {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_record(&path, nested, fields);
            }
        }
        Value::String(text) if !prefix.is_empty() => {
            fields.insert(prefix.to_string(), Value::String(text.clone()));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn flatten_walks_nested_blocks_into_dotted_keys() {
        let record = json!({
            "fullName": "Jane Doe",
            "thirdParty": { "fullName": "Sam Carer" },
            "clientSupportNeeds": { "textRelay": "yes" },
            "unrelated": 42,
        });

        let mut fields = Map::new();
        flatten_record("", &record, &mut fields);

        assert_eq!(fields["fullName"], "Jane Doe");
        assert_eq!(fields["thirdParty.fullName"], "Sam Carer");
        assert_eq!(fields["clientSupportNeeds.textRelay"], "yes");
        assert!(!fields.contains_key("unrelated"));
    }
}
