// Static phrase and keyword tables backing the pattern scanner.
//
// All matching is case-insensitive substring/regex matching over these
// tables — no ML anywhere in this module. The tables are versioned so a
// scan result can be tied to the table revision that produced it.

/// Bumped whenever any table below changes. Recorded in every PatternReport.
pub const TABLE_VERSION: &str = "2024-06-1";

/// Region-specific rhetorical trigger phrases: Pidgin expressions,
/// political grievance templates, sensationalist openers, and
/// religious/ethnic conflict framing.
pub const TRIGGER_PHRASES: &[&str] = &[
    // Pidgin expressions
    r"aswear",
    r"na them",
    r"dem wan kill us",
    r"nawa o",
    r"wetin be this",
    r"shey na joke",
    r"this is madness",
    r"see wetin dey happen",
    r"dem don finish us",
    r"na wa o",
    r"which kind country be this",
    // Political triggers
    r"this country is finished",
    r"government is lying",
    r"our leaders have failed us",
    r"politicians are thieves",
    r"dem no care about us",
    r"nigeria don spoil finish",
    // Sensationalist patterns
    r"breaking[:\-]?",
    r"shocking truth",
    r"they don't want you to know",
    r"the real truth",
    r"hidden agenda",
    r"wake up nigeria",
    // Religious/ethnic triggers
    r"christian vs muslim",
    r"yoruba vs igbo",
    r"hausa vs",
    r"religious war",
    r"ethnic cleansing",
    r"genocide",
    r"targeted killing",
];

/// Clickbait headline templates.
pub const CLICKBAIT_PATTERNS: &[&str] = &[
    r"you won't believe",
    r"number \d+ will shock you",
    r"what happened next",
    r"see what \w+ did",
    r"this will amaze you",
    r"must see",
    r"viral video",
    r"gone wrong",
    r"you need to see this",
    r"incredible footage",
];

/// Fake-news language markers: sensationalist vocabulary, conspiracy
/// framing, and emotional-manipulation hooks.
pub const FAKE_NEWS_PATTERNS: &[&str] = &[
    // Sensationalist words
    r"\bbreaking\b",
    r"\bshocking\b",
    r"\brevealed\b",
    r"\bexposed\b",
    r"\bscandal\b",
    r"\bcollapse\b",
    r"\btotal failure\b",
    r"\bmust watch\b",
    r"\bagenda\b",
    r"\bhidden truth\b",
    r"\bcover[- ]?up\b",
    // Conspiracy patterns
    r"what they don'?t want you to know",
    r"wake up nigeria",
    r"the truth (?:about|behind)",
    r"secret (?:meeting|plan|agenda)",
    r"they are hiding",
    r"mainstream media won't tell you",
    // Emotional manipulation
    r"you will cry",
    r"heartbreaking",
    r"devastating news",
    r"this will make you angry",
    r"prepare to be shocked",
];

/// Credibility red flags: unverifiable sourcing and vague attribution.
pub const CREDIBILITY_RED_FLAGS: &[&str] = &[
    // Suspicious sources
    r"according to sources",
    r"insider reveals",
    r"anonymous tip",
    r"leaked document",
    r"confidential source",
    r"whistleblower",
    // Vague attributions (no specific names)
    r"experts say",
    r"studies show",
    r"research proves",
    r"scientists confirm",
    r"doctors warn",
];

/// Viral-manipulation patterns: urgency, FOMO, and social proof.
pub const VIRAL_PATTERNS: &[&str] = &[
    // Urgency
    r"share (?:this|now|before)",
    r"retweet if you",
    r"tag your friends",
    r"urgent",
    r"time sensitive",
    r"delete this",
    r"censored",
    // FOMO
    r"limited time",
    r"won't last long",
    r"before it's too late",
    r"last chance",
    r"final warning",
    r"don't miss this",
    // Social proof
    r"everyone is talking about",
    r"going viral",
    r"trending now",
    r"millions have seen",
    r"shared \d+ times",
];

/// A bias keyword group: plain substring terms tied to one bias category.
pub struct KeywordGroup {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub terms: &'static [&'static str],
}

/// Bias-indicative keywords, grouped by category and subcategory.
/// These feed the lightweight bias inference — matching is plain
/// lowercase substring containment, in table order.
pub const BIAS_KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: "political",
        subcategory: "parties",
        terms: &[
            "apc",
            "pdp",
            "labour party",
            "nnpp",
            "apga",
            "buhari",
            "tinubu",
            "atiku",
            "obi",
        ],
    },
    KeywordGroup {
        category: "political",
        subcategory: "bias_terms",
        terms: &[
            "cabals",
            "fulani agenda",
            "igbo agenda",
            "yoruba agenda",
        ],
    },
    KeywordGroup {
        category: "ethnic",
        subcategory: "groups",
        terms: &[
            "yoruba", "igbo", "hausa", "fulani", "ijaw", "kanuri", "tiv", "edo", "efik",
        ],
    },
    KeywordGroup {
        category: "ethnic",
        subcategory: "derogatory",
        terms: &["aboki", "nyamiri", "gambari", "omo ale"],
    },
    KeywordGroup {
        category: "religious",
        subcategory: "groups",
        terms: &[
            "christian",
            "muslim",
            "catholic",
            "pentecostal",
            "orthodox",
            "sunni",
            "shia",
        ],
    },
    KeywordGroup {
        category: "religious",
        subcategory: "bias_terms",
        terms: &[
            "infidel",
            "kafir",
            "pagan",
            "fundamentalist",
            "jihadist",
            "crusader",
        ],
    },
    KeywordGroup {
        category: "religious",
        subcategory: "contexts",
        terms: &["sharia", "jihad", "crusade", "persecution"],
    },
    KeywordGroup {
        category: "regional",
        subcategory: "regions",
        terms: &[
            "northerner",
            "southerner",
            "middle belt",
            "core north",
            "arewa",
            "biafra",
        ],
    },
];
