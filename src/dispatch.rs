use crate::catalog;
use crate::error::ApiError;
use crate::params;
use crate::provider::DataProvider;
use crate::table::Table;
use log::info;
use std::collections::BTreeMap;

// Resolves a named operation, builds its typed request from the form bag and
// runs it against the provider. Unknown names never reach the provider.
pub async fn run(
    provider: &dyn DataProvider,
    name: &str,
    form: BTreeMap<String, String>,
) -> Result<Table, ApiError> {
    let descriptor = catalog::find(name).ok_or_else(|| ApiError::UnknownOperation {
        name: name.to_string(),
    })?;
    let request = params::build_request(descriptor, form)?;
    info!("Dispatching {name}");
    let table = provider.fetch(&request).await?;

    // A table with columns but no rows is a valid answer (real schema, no
    // matching rows). Only a fully empty result counts as no data.
    if table.rows().is_empty() && table.columns().is_empty() {
        return Err(ApiError::NoDataFound);
    }
    Ok(table)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Dataset;
    use crate::provider::testing::StubProvider;
    use crate::table::Scalar;
    use pretty_assertions::assert_eq;

    fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schedules_table() -> Table {
        Table::from_rows(
            vec!["season".to_string(), "home_team".to_string()],
            vec![vec![Scalar::Int(2023), Scalar::Text("KC".to_string())]],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn unknown_operation_never_hits_provider() {
        let provider = StubProvider::returning(schedules_table());
        let err = run(&provider, "import_sandwiches", form(&[]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownOperation { name } if name == "import_sandwiches"
        ));
        assert!(provider.seen().is_empty());
    }

    #[tokio::test]
    async fn dispatches_typed_request() {
        let provider = StubProvider::returning(schedules_table());
        let table = run(&provider, "import_schedules", form(&[("years", "2023")]))
            .await
            .unwrap();
        assert_eq!(table.columns(), &["season", "home_team"]);

        let seen = provider.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].dataset, Dataset::Schedules);
        assert_eq!(seen[0].years, vec![2023]);
    }

    #[tokio::test]
    async fn parameter_errors_stop_before_fetch() {
        let provider = StubProvider::returning(schedules_table());
        let err = run(&provider, "import_schedules", form(&[]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingRequiredParameter { field } if field == "years"
        ));
        assert!(provider.seen().is_empty());
    }

    #[tokio::test]
    async fn fully_empty_result_is_no_data() {
        let empty = Table::from_rows(Vec::new(), Vec::new()).unwrap();
        let provider = StubProvider::returning(empty);
        let err = run(&provider, "import_players", form(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoDataFound));
    }

    #[tokio::test]
    async fn empty_rows_with_schema_pass_through() {
        let headers_only =
            Table::from_rows(vec!["season".to_string()], Vec::new()).unwrap();
        let provider = StubProvider::returning(headers_only);
        let table = run(&provider, "import_schedules", form(&[("years", "1999")]))
            .await
            .unwrap();
        assert_eq!(table.columns(), &["season"]);
        assert!(table.rows().is_empty());
    }

    #[tokio::test]
    async fn provider_failures_surface_as_provider_errors() {
        let provider = StubProvider::failing("pbp mirror offline");
        let err = run(&provider, "import_schedules", form(&[("years", "2023")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Provider(_)));
        assert!(err.to_string().contains("pbp mirror offline"));
    }
}
