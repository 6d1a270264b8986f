use log::warn;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

// Keeps a hostile "1-4000000" from expanding into gigabytes.
const MAX_EXPANDED_YEARS: usize = 500;

fn year(i: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>()).parse(i)
}

// One element of the list: a year, or an inclusive "start-end" span.
fn span(i: &str) -> IResult<&str, (u32, Option<u32>)> {
    (
        year,
        opt(preceded(
            delimited(multispace0, tag("-"), multispace0),
            year,
        )),
    )
        .parse(i)
}

fn year_list(i: &str) -> IResult<&str, Vec<(u32, Option<u32>)>> {
    delimited(
        multispace0,
        separated_list1(delimited(multispace0, tag(","), multispace0), span),
        multispace0,
    )
    .parse(i)
}

// Parses the `years` form value: comma-separated years with optional
// inclusive ranges, e.g. "2019, 2021-2023". Duplicates collapse, keeping
// first-appearance order.
pub fn parse_years(input: &str) -> Result<Vec<u32>, String> {
    let (_, spans) = all_consuming(year_list).parse(input).map_err(|e| {
        warn!("Failed to parse years {input:?}: {e:?}");
        "expected comma-separated years like 2019,2021-2023".to_string()
    })?;

    let mut years: Vec<u32> = Vec::new();
    for (start, end) in spans {
        let end = end.unwrap_or(start);
        if end < start {
            return Err(format!("year range {start}-{end} is reversed"));
        }
        // Widths are counted in u64: the span 0-4294967295 is grammatically
        // valid and its width does not fit in u32.
        let width = u64::from(end) - u64::from(start) + 1;
        if years.len() as u64 + width > MAX_EXPANDED_YEARS as u64 {
            return Err(format!(
                "too many years requested, the limit is {MAX_EXPANDED_YEARS}"
            ));
        }
        for value in start..=end {
            if !years.contains(&value) {
                years.push(value);
            }
        }
    }
    Ok(years)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_single_year() {
        assert_eq!(parse_years("2023").unwrap(), vec![2023]);
        assert_eq!(parse_years("  2023  ").unwrap(), vec![2023]);
    }

    #[test]
    fn parse_year_list() {
        assert_eq!(
            parse_years("2019, 2020,2021").unwrap(),
            vec![2019, 2020, 2021]
        );
    }

    #[test]
    fn parse_ranges() {
        assert_eq!(
            parse_years("2019-2021").unwrap(),
            vec![2019, 2020, 2021]
        );
        assert_eq!(
            parse_years("2019, 2021-2023").unwrap(),
            vec![2019, 2021, 2022, 2023]
        );
        assert_eq!(
            parse_years("2019 - 2020").unwrap(),
            vec![2019, 2020]
        );
    }

    #[test]
    fn duplicates_collapse_in_order() {
        assert_eq!(
            parse_years("2021,2019-2022").unwrap(),
            vec![2021, 2019, 2020, 2022]
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_years("").is_err());
        assert!(parse_years("20x9").is_err());
        assert!(parse_years("2023-").is_err());
        assert!(parse_years("2019,,2021").is_err());
        assert!(parse_years("two thousand").is_err());
    }

    #[test]
    fn rejects_reversed_range() {
        let err = parse_years("2005-2001").unwrap_err();
        assert!(err.contains("reversed"));
    }

    #[test]
    fn rejects_oversized_range() {
        let err = parse_years("1-4000000").unwrap_err();
        assert!(err.contains("too many years"));
    }

    #[test]
    fn rejects_full_u32_span() {
        // Width of this span overflows u32; it must be refused, not expanded.
        let err = parse_years("0-4294967295").unwrap_err();
        assert!(err.contains("too many years"));
        let err = parse_years("2020,0-4294967295").unwrap_err();
        assert!(err.contains("too many years"));
    }
}
