use crate::error::ApiError;
use crate::table::{Scalar, ScalarKey, Table};
use log::debug;
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChartKind {
    Scatter,
    Line,
    Bar,
    Histogram,
    Box,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scatter" => Ok(ChartKind::Scatter),
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "histogram" => Ok(ChartKind::Histogram),
            "box" => Ok(ChartKind::Box),
            _ => Err(format!("unknown chart kind: {s}")),
        }
    }
}

impl ChartKind {
    // The line chart is a scatter trace drawn with connecting lines.
    fn trace_type(self) -> &'static str {
        match self {
            ChartKind::Scatter | ChartKind::Line => "scatter",
            ChartKind::Bar => "bar",
            ChartKind::Histogram => "histogram",
            ChartKind::Box => "box",
        }
    }
}

#[derive(Serialize, Debug)]
struct Trace {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    x: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<Vec<Scalar>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    histfunc: Option<&'static str>,
}

impl Trace {
    fn new(kind: &'static str, name: Option<String>, x: Vec<Scalar>) -> Self {
        Self {
            kind,
            mode: None,
            name,
            x,
            y: None,
            histfunc: None,
        }
    }
}

#[derive(Serialize, Debug)]
struct AxisTitle {
    title: String,
}

#[derive(Serialize, Debug)]
struct Layout {
    title: String,
    xaxis: AxisTitle,
    yaxis: AxisTitle,
}

#[derive(Serialize, Debug)]
struct Chart {
    data: Vec<Trace>,
    layout: Layout,
}

// Builds the serialized chart description for a table. Empty strings for y
// and color mean the field was not selected.
pub fn build(
    table: &Table,
    chart_type: &str,
    x: &str,
    y: &str,
    color: &str,
) -> Result<String, ApiError> {
    if table.rows().is_empty() {
        return Err(ApiError::EmptyTable);
    }
    let x_idx = column(table, x)?;
    let y_idx = match y {
        "" => None,
        _ => Some(column(table, y)?),
    };
    let color_idx = match color {
        "" => None,
        _ => Some(column(table, color)?),
    };
    let kind: ChartKind =
        chart_type
            .parse()
            .map_err(|_: String| ApiError::UnsupportedChartType {
                requested: chart_type.to_string(),
            })?;

    // The histogram only keeps y as a summed aggregation when it names a
    // different column than x; otherwise it counts occurrences of x.
    let sum_y = kind == ChartKind::Histogram && y_idx.is_some() && y != x;

    let groups = partition(table, color_idx);
    let mut data = Vec::with_capacity(groups.len());
    for (name, rows) in groups {
        let x_values = series(table, x_idx, &rows);
        let y_values = y_idx.map(|idx| series(table, idx, &rows));
        let mut trace = Trace::new(kind.trace_type(), name, x_values);
        match kind {
            ChartKind::Scatter => {
                trace.mode = Some("markers");
                trace.y = y_values;
            }
            ChartKind::Line => {
                trace.mode = Some("lines");
                trace.y = y_values;
            }
            ChartKind::Bar | ChartKind::Box => trace.y = y_values,
            ChartKind::Histogram => {
                if sum_y {
                    trace.y = y_values;
                    trace.histfunc = Some("sum");
                }
            }
        }
        data.push(trace);
    }

    let y_title = match kind {
        ChartKind::Histogram if sum_y => format!("sum of {y}"),
        ChartKind::Histogram => "count".to_string(),
        _ => y.to_string(),
    };
    let chart = Chart {
        data,
        layout: Layout {
            title: title(kind, x, y, color),
            xaxis: AxisTitle {
                title: x.to_string(),
            },
            yaxis: AxisTitle { title: y_title },
        },
    };
    debug!(
        "Built a {chart_type} chart with {} trace(s) over {} row(s)",
        chart.data.len(),
        table.rows().len()
    );
    Ok(serde_json::to_string(&chart)?)
}

fn column(table: &Table, name: &str) -> Result<usize, ApiError> {
    table
        .column_index(name)
        .ok_or_else(|| ApiError::UnknownColumn {
            column: name.to_string(),
        })
}

fn title(kind: ChartKind, x: &str, y: &str, color: &str) -> String {
    let base = match kind {
        ChartKind::Scatter | ChartKind::Line => format!("{y} vs. {x}"),
        ChartKind::Bar => format!("{y} by {x}"),
        ChartKind::Histogram => format!("Distribution of {x}"),
        ChartKind::Box => format!("Box plot of {y} by {x}"),
    };
    if color.is_empty() {
        base
    } else {
        format!("{base} by {color}")
    }
}

// One trace per distinct color value in first-appearance order, or a single
// unnamed trace when no color field is selected.
fn partition(table: &Table, color_idx: Option<usize>) -> Vec<(Option<String>, Vec<usize>)> {
    let Some(idx) = color_idx else {
        return vec![(None, (0..table.rows().len()).collect())];
    };
    let mut groups: Vec<(ScalarKey, Option<String>, Vec<usize>)> = Vec::new();
    for (row_idx, row) in table.rows().iter().enumerate() {
        let key = row[idx].key();
        match groups.iter().position(|(k, _, _)| *k == key) {
            Some(group) => groups[group].2.push(row_idx),
            None => groups.push((key, Some(row[idx].to_string()), vec![row_idx])),
        }
    }
    groups
        .into_iter()
        .map(|(_, name, rows)| (name, rows))
        .collect()
}

fn series(table: &Table, column: usize, rows: &[usize]) -> Vec<Scalar> {
    rows.iter()
        .map(|&row| table.rows()[row][column].clone())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    fn fixture() -> Table {
        Table::from_rows(
            vec![
                "attempts".to_string(),
                "passing_yards".to_string(),
                "team".to_string(),
            ],
            vec![
                vec![Scalar::Int(30), Scalar::Int(310), text("KC")],
                vec![Scalar::Int(25), Scalar::Int(240), text("DET")],
                vec![Scalar::Int(41), Scalar::Int(305), text("KC")],
            ],
        )
        .unwrap()
    }

    fn parse(spec: &str) -> Value {
        serde_json::from_str(spec).unwrap()
    }

    #[test]
    fn scatter_layout() {
        let spec = build(&fixture(), "scatter", "attempts", "passing_yards", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
        assert_eq!(value["data"][0]["type"], "scatter");
        assert_eq!(value["data"][0]["mode"], "markers");
        assert_eq!(value["data"][0]["x"], parse("[30,25,41]"));
        assert_eq!(value["data"][0]["y"], parse("[310,240,305]"));
        assert_eq!(value["layout"]["title"], "passing_yards vs. attempts");
        assert_eq!(value["layout"]["xaxis"]["title"], "attempts");
        assert_eq!(value["layout"]["yaxis"]["title"], "passing_yards");
        // No color selection means no trace name.
        assert!(value["data"][0].get("name").is_none());
    }

    #[test]
    fn line_uses_scatter_trace_with_lines() {
        let spec = build(&fixture(), "line", "attempts", "passing_yards", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"][0]["type"], "scatter");
        assert_eq!(value["data"][0]["mode"], "lines");
        assert_eq!(value["layout"]["title"], "passing_yards vs. attempts");
    }

    #[test]
    fn bar_title() {
        let spec = build(&fixture(), "bar", "team", "passing_yards", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"][0]["type"], "bar");
        assert_eq!(value["layout"]["title"], "passing_yards by team");
    }

    #[test]
    fn box_title() {
        let spec = build(&fixture(), "box", "team", "passing_yards", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"][0]["type"], "box");
        assert_eq!(value["layout"]["title"], "Box plot of passing_yards by team");
    }

    #[test]
    fn plain_histogram_counts() {
        let spec = build(&fixture(), "histogram", "attempts", "attempts", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"][0]["type"], "histogram");
        assert!(value["data"][0].get("y").is_none());
        assert!(value["data"][0].get("histfunc").is_none());
        assert_eq!(value["layout"]["title"], "Distribution of attempts");
        assert_eq!(value["layout"]["yaxis"]["title"], "count");
    }

    #[test]
    fn histogram_with_distinct_y_sums() {
        let spec = build(&fixture(), "histogram", "team", "passing_yards", "").unwrap();
        let value = parse(&spec);
        assert_eq!(value["data"][0]["histfunc"], "sum");
        assert_eq!(value["data"][0]["y"], parse("[310,240,305]"));
        assert_eq!(value["layout"]["yaxis"]["title"], "sum of passing_yards");
    }

    #[test]
    fn color_partitions_in_first_appearance_order() {
        let spec = build(&fixture(), "scatter", "attempts", "passing_yards", "team").unwrap();
        let value = parse(&spec);
        let traces = value["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "KC");
        assert_eq!(traces[0]["x"], parse("[30,41]"));
        assert_eq!(traces[0]["y"], parse("[310,305]"));
        assert_eq!(traces[1]["name"], "DET");
        assert_eq!(traces[1]["x"], parse("[25]"));
        assert_eq!(
            value["layout"]["title"],
            "passing_yards vs. attempts by team"
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        let empty = Table::from_rows(vec!["a".to_string()], Vec::new()).unwrap();
        assert!(matches!(
            build(&empty, "scatter", "a", "a", ""),
            Err(ApiError::EmptyTable)
        ));
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let err = build(&fixture(), "scatter", "nope", "passing_yards", "").unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownColumn { column } if column == "nope"
        ));

        let err = build(&fixture(), "bar", "attempts", "passing_yards", "city").unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownColumn { column } if column == "city"
        ));
    }

    #[test]
    fn unsupported_kind_is_rejected_after_column_checks() {
        let err = build(&fixture(), "pie", "attempts", "passing_yards", "").unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnsupportedChartType { requested } if requested == "pie"
        ));

        // Column problems win over the unknown chart kind.
        let err = build(&fixture(), "pie", "nope", "passing_yards", "").unwrap_err();
        assert!(matches!(err, ApiError::UnknownColumn { .. }));
    }
}
