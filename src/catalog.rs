// Static catalog of the named data-fetch operations the /search endpoint can
// dispatch to, with the form parameters each one accepts.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dataset {
    PlayByPlay,
    WeeklyStats,
    SeasonalStats,
    SeasonalRosters,
    WeeklyRosters,
    WinTotals,
    Officials,
    ScoringLines,
    Schedules,
    DraftPicks,
    DraftValues,
    Combine,
    IdMap,
    NextGenStats,
    DepthCharts,
    Injuries,
    Qbr,
    SeasonalPfr,
    WeeklyPfr,
    SnapCounts,
    FtnCharting,
    Players,
    Contracts,
    TeamDescriptions,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::PlayByPlay => "play-by-play",
            Dataset::WeeklyStats => "weekly player stats",
            Dataset::SeasonalStats => "seasonal player stats",
            Dataset::SeasonalRosters => "seasonal rosters",
            Dataset::WeeklyRosters => "weekly rosters",
            Dataset::WinTotals => "vegas win totals",
            Dataset::Officials => "game officials",
            Dataset::ScoringLines => "betting lines",
            Dataset::Schedules => "schedules",
            Dataset::DraftPicks => "draft picks",
            Dataset::DraftValues => "draft pick values",
            Dataset::Combine => "scouting combine",
            Dataset::IdMap => "player id map",
            Dataset::NextGenStats => "next gen stats",
            Dataset::DepthCharts => "depth charts",
            Dataset::Injuries => "injury reports",
            Dataset::Qbr => "ESPN QBR",
            Dataset::SeasonalPfr => "seasonal PFR advanced stats",
            Dataset::WeeklyPfr => "weekly PFR advanced stats",
            Dataset::SnapCounts => "snap counts",
            Dataset::FtnCharting => "FTN charting",
            Dataset::Players => "players",
            Dataset::Contracts => "contracts",
            Dataset::TeamDescriptions => "team descriptions",
        }
    }
}

// How one form field's string value is interpreted before it reaches the
// provider. Each kind fills exactly one FetchRequest slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamKind {
    Years,
    Columns,
    Positions,
    IdSystems,
    SeasonType,
    NgsStatType,
    QbrLevel,
    QbrFrequency,
    PfrStatType,
    IncludeParticipation,
    Downcast,
    Cache,
    ThreadRequests,
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub field: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub dataset: Dataset,
    pub params: &'static [ParamSpec],
}

const YEARS_REQUIRED: ParamSpec = ParamSpec {
    field: "years",
    kind: ParamKind::Years,
    required: true,
};
const YEARS_OPTIONAL: ParamSpec = ParamSpec {
    field: "years",
    kind: ParamKind::Years,
    required: false,
};
const COLUMNS: ParamSpec = ParamSpec {
    field: "columns_str",
    kind: ParamKind::Columns,
    required: false,
};

pub static OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "import_pbp_data",
        dataset: Dataset::PlayByPlay,
        params: &[
            YEARS_REQUIRED,
            COLUMNS,
            ParamSpec {
                field: "pbp_include_participation",
                kind: ParamKind::IncludeParticipation,
                required: false,
            },
            ParamSpec {
                field: "pbp_downcast",
                kind: ParamKind::Downcast,
                required: false,
            },
            ParamSpec {
                field: "pbp_cache",
                kind: ParamKind::Cache,
                required: false,
            },
            ParamSpec {
                field: "pbp_thread_requests",
                kind: ParamKind::ThreadRequests,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_weekly_data",
        dataset: Dataset::WeeklyStats,
        params: &[
            YEARS_REQUIRED,
            COLUMNS,
            ParamSpec {
                field: "weekly_downcast",
                kind: ParamKind::Downcast,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_seasonal_data",
        dataset: Dataset::SeasonalStats,
        params: &[
            YEARS_REQUIRED,
            ParamSpec {
                field: "seasonal_s_type",
                kind: ParamKind::SeasonType,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_seasonal_rosters",
        dataset: Dataset::SeasonalRosters,
        params: &[YEARS_REQUIRED, COLUMNS],
    },
    OperationDescriptor {
        name: "import_weekly_rosters",
        dataset: Dataset::WeeklyRosters,
        params: &[YEARS_REQUIRED, COLUMNS],
    },
    OperationDescriptor {
        name: "import_win_totals",
        dataset: Dataset::WinTotals,
        params: &[YEARS_OPTIONAL],
    },
    OperationDescriptor {
        name: "import_officials",
        dataset: Dataset::Officials,
        params: &[YEARS_OPTIONAL],
    },
    OperationDescriptor {
        name: "import_sc_lines",
        dataset: Dataset::ScoringLines,
        params: &[YEARS_OPTIONAL],
    },
    OperationDescriptor {
        name: "import_schedules",
        dataset: Dataset::Schedules,
        params: &[YEARS_REQUIRED],
    },
    OperationDescriptor {
        name: "import_draft_picks",
        dataset: Dataset::DraftPicks,
        params: &[YEARS_OPTIONAL],
    },
    OperationDescriptor {
        name: "import_draft_values",
        dataset: Dataset::DraftValues,
        params: &[],
    },
    OperationDescriptor {
        name: "import_combine_data",
        dataset: Dataset::Combine,
        params: &[
            YEARS_OPTIONAL,
            ParamSpec {
                field: "combine_positions",
                kind: ParamKind::Positions,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_ids",
        dataset: Dataset::IdMap,
        params: &[
            COLUMNS,
            ParamSpec {
                field: "ids_ids",
                kind: ParamKind::IdSystems,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_ngs_data",
        dataset: Dataset::NextGenStats,
        params: &[
            YEARS_REQUIRED,
            ParamSpec {
                field: "ngs_stat_type",
                kind: ParamKind::NgsStatType,
                required: true,
            },
        ],
    },
    OperationDescriptor {
        name: "import_depth_charts",
        dataset: Dataset::DepthCharts,
        params: &[YEARS_REQUIRED],
    },
    OperationDescriptor {
        name: "import_injuries",
        dataset: Dataset::Injuries,
        params: &[YEARS_REQUIRED],
    },
    OperationDescriptor {
        name: "import_qbr",
        dataset: Dataset::Qbr,
        params: &[
            YEARS_REQUIRED,
            ParamSpec {
                field: "qbr_level",
                kind: ParamKind::QbrLevel,
                required: false,
            },
            ParamSpec {
                field: "qbr_frequency",
                kind: ParamKind::QbrFrequency,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_seasonal_pfr",
        dataset: Dataset::SeasonalPfr,
        params: &[
            YEARS_REQUIRED,
            ParamSpec {
                field: "pfr_s_type",
                kind: ParamKind::PfrStatType,
                required: true,
            },
        ],
    },
    OperationDescriptor {
        name: "import_weekly_pfr",
        dataset: Dataset::WeeklyPfr,
        params: &[
            YEARS_REQUIRED,
            ParamSpec {
                field: "pfr_s_type",
                kind: ParamKind::PfrStatType,
                required: true,
            },
        ],
    },
    OperationDescriptor {
        name: "import_snap_counts",
        dataset: Dataset::SnapCounts,
        params: &[YEARS_REQUIRED],
    },
    OperationDescriptor {
        name: "import_ftn_data",
        dataset: Dataset::FtnCharting,
        params: &[
            YEARS_REQUIRED,
            COLUMNS,
            ParamSpec {
                field: "ftn_downcast",
                kind: ParamKind::Downcast,
                required: false,
            },
            ParamSpec {
                field: "ftn_thread_requests",
                kind: ParamKind::ThreadRequests,
                required: false,
            },
        ],
    },
    OperationDescriptor {
        name: "import_players",
        dataset: Dataset::Players,
        params: &[],
    },
    OperationDescriptor {
        name: "import_contracts",
        dataset: Dataset::Contracts,
        params: &[],
    },
    OperationDescriptor {
        name: "import_team_desc",
        dataset: Dataset::TeamDescriptions,
        params: &[],
    },
];

pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
    OPERATIONS.iter().find(|op| op.name == name)
}
