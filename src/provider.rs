// Client for the published nflverse CSV assets, behind a trait so the HTTP
// layer can be exercised without network access.

use crate::catalog::Dataset;
use crate::columns;
use crate::table::{Scalar, ScalarKey, Table, TableError};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use log::{debug, trace};
use reqwest::Client;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

pub const NFLVERSE_BASE_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download";

const SAMPLE_SEASON: u32 = 2023;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SeasonType {
    Reg,
    Post,
    All,
}

impl FromStr for SeasonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REG" => Ok(SeasonType::Reg),
            "POST" => Ok(SeasonType::Post),
            "ALL" => Ok(SeasonType::All),
            _ => Err(format!("unknown season type {s:?}, expected REG, POST or ALL")),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NgsStatType {
    Passing,
    Rushing,
    Receiving,
}

impl NgsStatType {
    pub fn as_str(self) -> &'static str {
        match self {
            NgsStatType::Passing => "passing",
            NgsStatType::Rushing => "rushing",
            NgsStatType::Receiving => "receiving",
        }
    }
}

impl FromStr for NgsStatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passing" => Ok(NgsStatType::Passing),
            "rushing" => Ok(NgsStatType::Rushing),
            "receiving" => Ok(NgsStatType::Receiving),
            _ => Err(format!(
                "unknown stat type {s:?}, expected passing, rushing or receiving"
            )),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QbrLevel {
    Nfl,
    College,
}

impl QbrLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            QbrLevel::Nfl => "nfl",
            QbrLevel::College => "college",
        }
    }
}

impl FromStr for QbrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nfl" => Ok(QbrLevel::Nfl),
            "college" => Ok(QbrLevel::College),
            _ => Err(format!("unknown QBR level {s:?}, expected nfl or college")),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QbrFrequency {
    Season,
    Weekly,
}

impl QbrFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            QbrFrequency::Season => "season",
            QbrFrequency::Weekly => "weekly",
        }
    }
}

impl FromStr for QbrFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "season" => Ok(QbrFrequency::Season),
            "weekly" => Ok(QbrFrequency::Weekly),
            _ => Err(format!(
                "unknown QBR frequency {s:?}, expected season or weekly"
            )),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PfrStatType {
    Pass,
    Rush,
    Rec,
    Def,
}

impl PfrStatType {
    pub fn as_str(self) -> &'static str {
        match self {
            PfrStatType::Pass => "pass",
            PfrStatType::Rush => "rush",
            PfrStatType::Rec => "rec",
            PfrStatType::Def => "def",
        }
    }
}

impl FromStr for PfrStatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(PfrStatType::Pass),
            "rush" => Ok(PfrStatType::Rush),
            "rec" => Ok(PfrStatType::Rec),
            "def" => Ok(PfrStatType::Def),
            _ => Err(format!(
                "unknown stat type {s:?}, expected pass, rush, rec or def"
            )),
        }
    }
}

// Typed request handed to a provider after the form bag has been decoded
// and filtered down to the fields the operation accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub dataset: Dataset,
    pub years: Vec<u32>,
    pub columns: Vec<String>,
    pub season_type: SeasonType,
    pub positions: Vec<String>,
    pub id_systems: Vec<String>,
    pub ngs_stat_type: Option<NgsStatType>,
    pub qbr_level: QbrLevel,
    pub qbr_frequency: QbrFrequency,
    pub pfr_stat_type: Option<PfrStatType>,
    pub include_participation: bool,
    pub downcast: bool,
    pub cache: bool,
    pub thread_requests: bool,
}

impl FetchRequest {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            years: Vec::new(),
            columns: Vec::new(),
            season_type: SeasonType::Reg,
            positions: Vec::new(),
            id_systems: Vec::new(),
            ngs_stat_type: None,
            qbr_level: QbrLevel::Nfl,
            qbr_frequency: QbrFrequency::Season,
            pfr_stat_type: None,
            include_participation: true,
            downcast: true,
            cache: false,
            thread_requests: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decompress {asset}: {source}")]
    Decompress {
        asset: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {asset}: {source}")]
    Csv {
        asset: String,
        #[source]
        source: csv::Error,
    },
    #[error("{dataset} data starts in {floor}, requested {year}")]
    YearTooEarly {
        dataset: &'static str,
        floor: u32,
        year: u32,
    },
    #[error("years are required for {dataset}")]
    YearsRequired { dataset: &'static str },
    #[error("a stat type is required for {dataset}")]
    StatTypeRequired { dataset: &'static str },
    #[error("unknown column requested: {column}")]
    UnknownColumn { column: String },
    #[error("{dataset} payload is missing the {column} column")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },
    #[error("column mismatch while merging {asset}")]
    ColumnMismatch { asset: String },
    #[error("constructed an invalid table while {action}: {source}")]
    Shape {
        action: String,
        #[source]
        source: TableError,
    },
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<Table, ProviderError>;
    async fn list_columns(&self, dataset: Dataset) -> Result<Vec<String>, ProviderError>;
}

pub struct NflverseProvider {
    client: Client,
    base_url: String,
}

impl NflverseProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn download_table(&self, release: &str, asset: &str) -> Result<Table, ProviderError> {
        let url = format!("{}/{release}/{asset}", self.base_url);
        debug!("Downloading {url}");
        let response = self.client.get(&url).send().await.map_err(|source| {
            ProviderError::Download {
                url: url.clone(),
                source,
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| ProviderError::Download {
                url: url.clone(),
                source,
            })?;
        let data = if asset.ends_with(".gz") {
            decompress(asset, &body)?
        } else {
            body.to_vec()
        };
        let table = parse_csv(asset, &data)?;
        debug!(
            "Decoded {} rows x {} columns from {asset}",
            table.rows().len(),
            table.columns().len()
        );
        Ok(table)
    }

    async fn fetch_dataset(&self, request: &FetchRequest) -> Result<Table, ProviderError> {
        match asset_plan(request)? {
            AssetPlan::PerYear { release, stem, gz } => {
                if request.years.is_empty() {
                    return Err(ProviderError::YearsRequired {
                        dataset: request.dataset.name(),
                    });
                }
                let extension = if gz { "csv.gz" } else { "csv" };
                let mut merged: Option<Table> = None;
                for &year in &request.years {
                    let asset = format!("{stem}_{year}.{extension}");
                    let table = self.download_table(release, &asset).await?;
                    merged = Some(match merged.take() {
                        None => table,
                        Some(acc) => append_rows(acc, table, &asset)?,
                    });
                }
                merged.ok_or(ProviderError::YearsRequired {
                    dataset: request.dataset.name(),
                })
            }
            AssetPlan::Single {
                release,
                asset,
                season_column,
            } => {
                let table = self.download_table(release, &asset).await?;
                match season_column {
                    Some(column) if !request.years.is_empty() => {
                        filter_years(table, column, &request.years, request.dataset.name())
                    }
                    _ => Ok(table),
                }
            }
        }
    }
}

#[async_trait]
impl DataProvider for NflverseProvider {
    async fn fetch(&self, request: &FetchRequest) -> Result<Table, ProviderError> {
        debug!(
            "Fetching {} for years {:?}",
            request.dataset.name(),
            request.years
        );
        trace!(
            "Tuning flags: include_participation={}, downcast={}, cache={}, thread_requests={}",
            request.include_participation, request.downcast, request.cache, request.thread_requests
        );
        check_years(request)?;

        let table = if request.dataset == Dataset::SeasonalStats {
            let mut weekly = request.clone();
            weekly.dataset = Dataset::WeeklyStats;
            let raw = self.fetch_dataset(&weekly).await?;
            aggregate_seasonal(raw, request.season_type)?
        } else {
            self.fetch_dataset(request).await?
        };

        let shaped = shape_table(table, request)?;
        debug!(
            "Prepared {} rows x {} columns of {}",
            shaped.rows().len(),
            shaped.columns().len(),
            request.dataset.name()
        );
        Ok(shaped)
    }

    async fn list_columns(&self, dataset: Dataset) -> Result<Vec<String>, ProviderError> {
        match dataset {
            Dataset::PlayByPlay => Ok(to_owned_columns(columns::PLAY_BY_PLAY)),
            Dataset::WeeklyStats => Ok(to_owned_columns(columns::WEEKLY_STATS)),
            _ => {
                let request = sample_request(dataset);
                let table = self.fetch(&request).await?;
                Ok(table.columns().to_vec())
            }
        }
    }
}

fn to_owned_columns(catalog: &[&str]) -> Vec<String> {
    catalog.iter().map(|c| c.to_string()).collect()
}

// A single recent season is enough to learn a dataset's schema.
fn sample_request(dataset: Dataset) -> FetchRequest {
    let mut request = FetchRequest::new(dataset);
    request.years = vec![SAMPLE_SEASON];
    match dataset {
        Dataset::NextGenStats => request.ngs_stat_type = Some(NgsStatType::Passing),
        Dataset::SeasonalPfr | Dataset::WeeklyPfr => {
            request.pfr_stat_type = Some(PfrStatType::Pass)
        }
        _ => {}
    }
    request
}

enum AssetPlan {
    PerYear {
        release: &'static str,
        stem: &'static str,
        gz: bool,
    },
    Single {
        release: &'static str,
        asset: String,
        season_column: Option<&'static str>,
    },
}

fn per_year(release: &'static str, stem: &'static str, gz: bool) -> AssetPlan {
    AssetPlan::PerYear { release, stem, gz }
}

fn single(
    release: &'static str,
    asset: impl Into<String>,
    season_column: Option<&'static str>,
) -> AssetPlan {
    AssetPlan::Single {
        release,
        asset: asset.into(),
        season_column,
    }
}

fn asset_plan(request: &FetchRequest) -> Result<AssetPlan, ProviderError> {
    let plan = match request.dataset {
        Dataset::PlayByPlay => per_year("pbp", "play_by_play", true),
        Dataset::WeeklyStats | Dataset::SeasonalStats => {
            per_year("player_stats", "player_stats", true)
        }
        Dataset::SeasonalRosters => per_year("rosters", "roster", false),
        Dataset::WeeklyRosters => per_year("weekly_rosters", "roster_weekly", false),
        Dataset::DepthCharts => per_year("depth_charts", "depth_charts", false),
        Dataset::Injuries => per_year("injuries", "injuries", false),
        Dataset::SnapCounts => per_year("snap_counts", "snap_counts", false),
        Dataset::FtnCharting => per_year("ftn_charting", "ftn_data", true),
        Dataset::WinTotals => single("win_totals", "win_totals.csv", Some("season")),
        Dataset::Officials => single("officials", "officials.csv", Some("season")),
        Dataset::ScoringLines => single("sc_lines", "sc_lines.csv", Some("season")),
        Dataset::Schedules => single("schedules", "games.csv", Some("season")),
        Dataset::DraftPicks => single("draft_picks", "draft_picks.csv", Some("season")),
        Dataset::DraftValues => single("draft_values", "draft_values.csv", None),
        Dataset::Combine => single("combine", "combine.csv", Some("season")),
        Dataset::IdMap => single("ids", "ids.csv", None),
        Dataset::Players => single("players", "players.csv", None),
        Dataset::Contracts => single("contracts", "historical_contracts.csv.gz", None),
        Dataset::TeamDescriptions => single("teams", "teams.csv", None),
        Dataset::NextGenStats => {
            let stat = request
                .ngs_stat_type
                .ok_or(ProviderError::StatTypeRequired {
                    dataset: request.dataset.name(),
                })?;
            single(
                "nextgen_stats",
                format!("ngs_{}.csv.gz", stat.as_str()),
                Some("season"),
            )
        }
        Dataset::Qbr => single(
            "espn_data",
            format!(
                "qbr_{}_{}.csv",
                request.qbr_level.as_str(),
                request.qbr_frequency.as_str()
            ),
            Some("season"),
        ),
        Dataset::SeasonalPfr => {
            let stat = request
                .pfr_stat_type
                .ok_or(ProviderError::StatTypeRequired {
                    dataset: request.dataset.name(),
                })?;
            single(
                "pfr_advstats",
                format!("advstats_season_{}.csv", stat.as_str()),
                Some("season"),
            )
        }
        Dataset::WeeklyPfr => {
            let stat = request
                .pfr_stat_type
                .ok_or(ProviderError::StatTypeRequired {
                    dataset: request.dataset.name(),
                })?;
            single(
                "pfr_advstats",
                format!("advstats_week_{}.csv", stat.as_str()),
                Some("season"),
            )
        }
    };
    Ok(plan)
}

// First season each dataset is published for.
fn year_floor(dataset: Dataset) -> Option<u32> {
    match dataset {
        Dataset::PlayByPlay
        | Dataset::WeeklyStats
        | Dataset::SeasonalStats
        | Dataset::Schedules => Some(1999),
        Dataset::SeasonalRosters => Some(1920),
        Dataset::WeeklyRosters => Some(2002),
        Dataset::Combine => Some(2000),
        Dataset::DepthCharts => Some(2001),
        Dataset::Qbr => Some(2006),
        Dataset::Injuries => Some(2009),
        Dataset::SnapCounts => Some(2012),
        Dataset::Officials => Some(2015),
        Dataset::NextGenStats => Some(2016),
        Dataset::SeasonalPfr | Dataset::WeeklyPfr => Some(2018),
        Dataset::FtnCharting => Some(2022),
        _ => None,
    }
}

fn check_years(request: &FetchRequest) -> Result<(), ProviderError> {
    let Some(floor) = year_floor(request.dataset) else {
        return Ok(());
    };
    for &year in &request.years {
        if year < floor {
            return Err(ProviderError::YearTooEarly {
                dataset: request.dataset.name(),
                floor,
                year,
            });
        }
    }
    Ok(())
}

fn shape_error(action: &str, source: TableError) -> ProviderError {
    ProviderError::Shape {
        action: action.to_string(),
        source,
    }
}

fn decompress(asset: &str, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
    let mut decoder = GzDecoder::new(data);
    let mut buffer = Vec::new();
    decoder
        .read_to_end(&mut buffer)
        .map_err(|source| ProviderError::Decompress {
            asset: asset.to_string(),
            source,
        })?;
    Ok(buffer)
}

fn parse_csv(asset: &str, data: &[u8]) -> Result<Table, ProviderError> {
    let mut reader = csv::Reader::from_reader(data);
    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| ProviderError::Csv {
            asset: asset.to_string(),
            source,
        })?
        .iter()
        .map(String::from)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ProviderError::Csv {
            asset: asset.to_string(),
            source,
        })?;
        rows.push(record.iter().map(decode_cell).collect());
    }
    Table::from_rows(columns, rows).map_err(|source| shape_error(&format!("decoding {asset}"), source))
}

fn decode_cell(raw: &str) -> Scalar {
    if raw.is_empty() || raw == "NA" {
        return Scalar::Null;
    }
    match raw {
        "TRUE" | "true" => return Scalar::Bool(true),
        "FALSE" | "false" => return Scalar::Bool(false),
        _ => {}
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Scalar::Int(value);
    }
    if let Ok(value) = raw.parse::<f64>()
        && value.is_finite()
    {
        return Scalar::Float(value);
    }
    Scalar::Text(raw.to_string())
}

fn append_rows(acc: Table, next: Table, asset: &str) -> Result<Table, ProviderError> {
    if acc.columns() != next.columns() {
        return Err(ProviderError::ColumnMismatch {
            asset: asset.to_string(),
        });
    }
    let columns = acc.columns().to_vec();
    let mut rows = acc.into_rows();
    rows.extend(next.into_rows());
    Table::from_rows(columns, rows).map_err(|source| shape_error("merging seasons", source))
}

fn filter_years(
    table: Table,
    column: &'static str,
    years: &[u32],
    dataset: &'static str,
) -> Result<Table, ProviderError> {
    let idx = table
        .column_index(column)
        .ok_or(ProviderError::MissingColumn { dataset, column })?;
    let columns = table.columns().to_vec();
    let rows = table
        .into_rows()
        .into_iter()
        .filter(|row| cell_matches_year(&row[idx], years))
        .collect();
    Table::from_rows(columns, rows).map_err(|source| shape_error("filtering seasons", source))
}

fn cell_matches_year(cell: &Scalar, years: &[u32]) -> bool {
    match cell {
        Scalar::Int(v) => years.iter().any(|&y| i64::from(y) == *v),
        Scalar::Float(v) => years.iter().any(|&y| f64::from(y) == *v),
        Scalar::Text(s) => s
            .trim()
            .parse::<u32>()
            .is_ok_and(|v| years.contains(&v)),
        _ => false,
    }
}

fn shape_table(mut table: Table, request: &FetchRequest) -> Result<Table, ProviderError> {
    if request.dataset == Dataset::Combine && !request.positions.is_empty() {
        table = filter_positions(table, &request.positions)?;
    }
    if request.dataset == Dataset::IdMap && !request.id_systems.is_empty() {
        table = select_id_columns(table, &request.id_systems)?;
    }
    if !request.columns.is_empty() {
        table = project_columns(table, &request.columns)?;
    }
    Ok(table)
}

fn filter_positions(table: Table, positions: &[String]) -> Result<Table, ProviderError> {
    let idx = table.column_index("pos").ok_or(ProviderError::MissingColumn {
        dataset: Dataset::Combine.name(),
        column: "pos",
    })?;
    let columns = table.columns().to_vec();
    let rows = table
        .into_rows()
        .into_iter()
        .filter(|row| match &row[idx] {
            Scalar::Text(pos) => positions.iter().any(|p| p.eq_ignore_ascii_case(pos)),
            _ => false,
        })
        .collect();
    Table::from_rows(columns, rows).map_err(|source| shape_error("filtering positions", source))
}

// Trims the id map down to the requested id systems, keeping every
// non-id column untouched.
fn select_id_columns(table: Table, systems: &[String]) -> Result<Table, ProviderError> {
    let wanted: Vec<String> = systems.iter().map(|s| format!("{s}_id")).collect();
    for name in &wanted {
        if table.column_index(name).is_none() {
            return Err(ProviderError::UnknownColumn {
                column: name.clone(),
            });
        }
    }
    let picks: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            !name.ends_with("_id") || wanted.iter().any(|w| w.as_str() == name.as_str())
        })
        .map(|(i, _)| i)
        .collect();
    take_columns(table, &picks, "selecting id columns")
}

fn project_columns(table: Table, requested: &[String]) -> Result<Table, ProviderError> {
    let mut picks = Vec::with_capacity(requested.len());
    for name in requested {
        let idx = table
            .column_index(name)
            .ok_or_else(|| ProviderError::UnknownColumn {
                column: name.clone(),
            })?;
        picks.push(idx);
    }
    take_columns(table, &picks, "projecting columns")
}

fn take_columns(table: Table, picks: &[usize], action: &str) -> Result<Table, ProviderError> {
    let columns = picks
        .iter()
        .map(|&i| table.columns()[i].clone())
        .collect();
    let rows = table
        .into_rows()
        .into_iter()
        .map(|row| picks.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Table::from_rows(columns, rows).map_err(|source| shape_error(action, source))
}

// Collapses weekly player rows into one row per (player, season), summing
// numeric cells and keeping the first value of everything else.
fn aggregate_seasonal(table: Table, season_type: SeasonType) -> Result<Table, ProviderError> {
    let dataset = Dataset::SeasonalStats.name();
    let type_idx = table
        .column_index("season_type")
        .ok_or(ProviderError::MissingColumn {
            dataset,
            column: "season_type",
        })?;
    let player_idx = table
        .column_index("player_id")
        .ok_or(ProviderError::MissingColumn {
            dataset,
            column: "player_id",
        })?;
    let season_idx = table
        .column_index("season")
        .ok_or(ProviderError::MissingColumn {
            dataset,
            column: "season",
        })?;

    // Per-week bookkeeping has no meaning at season granularity, and the
    // season_type tag would mislabel rows that combine REG and POST weeks.
    let dropped: Vec<usize> = ["week", "opponent_team", "season_type"]
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    let frozen = [player_idx, season_idx, type_idx];

    let mut order: Vec<(ScalarKey, ScalarKey)> = Vec::new();
    let mut groups: HashMap<(ScalarKey, ScalarKey), Vec<Scalar>> = HashMap::new();
    for row in table.rows() {
        let keep = match season_type {
            SeasonType::All => true,
            SeasonType::Reg => cell_is_text(&row[type_idx], "REG"),
            SeasonType::Post => cell_is_text(&row[type_idx], "POST"),
        };
        if !keep {
            continue;
        }
        let key = (row[player_idx].key(), row[season_idx].key());
        match groups.entry(key) {
            Entry::Occupied(mut entry) => {
                let acc = entry.get_mut();
                for (i, cell) in row.iter().enumerate() {
                    if !frozen.contains(&i) {
                        merge_cell(&mut acc[i], cell);
                    }
                }
            }
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(row.clone());
            }
        }
    }

    let columns: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| !dropped.contains(i))
        .map(|(_, name)| name.clone())
        .collect();
    let mut rows = Vec::with_capacity(order.len());
    for key in &order {
        if let Some(row) = groups.remove(key) {
            rows.push(
                row.into_iter()
                    .enumerate()
                    .filter(|(i, _)| !dropped.contains(i))
                    .map(|(_, cell)| cell)
                    .collect(),
            );
        }
    }
    Table::from_rows(columns, rows).map_err(|source| shape_error("aggregating seasons", source))
}

fn cell_is_text(cell: &Scalar, expected: &str) -> bool {
    matches!(cell, Scalar::Text(s) if s == expected)
}

// Numeric cells add up across weeks; anything else keeps its first value.
fn merge_cell(acc: &mut Scalar, next: &Scalar) {
    let merged = match (&*acc, next) {
        (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a.saturating_add(*b)),
        (Scalar::Int(a), Scalar::Float(b)) => Scalar::Float(*a as f64 + b),
        (Scalar::Float(a), Scalar::Int(b)) => Scalar::Float(a + *b as f64),
        (Scalar::Float(a), Scalar::Float(b)) => Scalar::Float(a + b),
        (Scalar::Null, other) => other.clone(),
        _ => return,
    };
    *acc = merged;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    // Test double recording every fetch request it receives.
    pub struct StubProvider {
        table: Table,
        failure: Option<String>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl StubProvider {
        pub fn returning(table: Table) -> Self {
            Self {
                table,
                failure: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            let table = Table::from_rows(Vec::new(), Vec::new()).unwrap();
            Self {
                table,
                failure: Some(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn seen(&self) -> Vec<FetchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DataProvider for StubProvider {
        async fn fetch(&self, request: &FetchRequest) -> Result<Table, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.failure {
                Some(message) => Err(ProviderError::Status {
                    url: message.clone(),
                    status: 500,
                }),
                None => Ok(self.table.clone()),
            }
        }

        async fn list_columns(&self, _dataset: Dataset) -> Result<Vec<String>, ProviderError> {
            match &self.failure {
                Some(message) => Err(ProviderError::Status {
                    url: message.clone(),
                    status: 500,
                }),
                None => Ok(self.table.columns().to_vec()),
            }
        }
    }
}
