use crate::catalog::{OperationDescriptor, ParamKind, ParamSpec};
use crate::error::ApiError;
use crate::provider::FetchRequest;
use crate::years;
use log::debug;
use std::collections::BTreeMap;
use std::str::FromStr;

// Turns the raw form bag into a typed request, honoring only the fields the
// operation accepts. Blank values count as absent, required fields must be
// present, and anything else in the bag is dropped.
pub fn build_request(
    descriptor: &OperationDescriptor,
    mut form: BTreeMap<String, String>,
) -> Result<FetchRequest, ApiError> {
    let mut request = FetchRequest::new(descriptor.dataset);
    for spec in descriptor.params {
        let value = form.remove(spec.field).filter(|v| !v.trim().is_empty());
        match value {
            Some(value) => apply(&mut request, spec, value.trim())?,
            None if spec.required => {
                return Err(ApiError::MissingRequiredParameter {
                    field: spec.field.to_string(),
                });
            }
            None => {}
        }
    }
    if !form.is_empty() {
        let dropped: Vec<&str> = form.keys().map(String::as_str).collect();
        debug!(
            "Dropping parameters {} does not accept: {dropped:?}",
            descriptor.name
        );
    }
    Ok(request)
}

fn apply(request: &mut FetchRequest, spec: &ParamSpec, value: &str) -> Result<(), ApiError> {
    match spec.kind {
        ParamKind::Years => {
            request.years =
                years::parse_years(value).map_err(|reason| invalid(spec.field, &reason))?;
        }
        ParamKind::Columns => request.columns = comma_list(value),
        ParamKind::Positions => request.positions = comma_list(value),
        ParamKind::IdSystems => request.id_systems = comma_list(value),
        ParamKind::SeasonType => request.season_type = parse(spec.field, value)?,
        ParamKind::NgsStatType => request.ngs_stat_type = Some(parse(spec.field, value)?),
        ParamKind::QbrLevel => request.qbr_level = parse(spec.field, value)?,
        ParamKind::QbrFrequency => request.qbr_frequency = parse(spec.field, value)?,
        ParamKind::PfrStatType => request.pfr_stat_type = Some(parse(spec.field, value)?),
        ParamKind::IncludeParticipation => {
            request.include_participation = flag(spec.field, value)?;
        }
        ParamKind::Downcast => request.downcast = flag(spec.field, value)?,
        ParamKind::Cache => request.cache = flag(spec.field, value)?,
        ParamKind::ThreadRequests => request.thread_requests = flag(spec.field, value)?,
    }
    Ok(())
}

fn parse<T>(field: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|reason: String| invalid(field, &reason))
}

fn flag(field: &str, value: &str) -> Result<bool, ApiError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(
            field,
            &format!("expected true or false, got {value:?}"),
        )),
    }
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn invalid(field: &str, reason: &str) -> ApiError {
    ApiError::InvalidParameterFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
