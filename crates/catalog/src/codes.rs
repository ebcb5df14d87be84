//! Well-known LOINC codes used by the NY State HRSN screener.
//!
//! This module provides constants for the question and answer codes the
//! screening instrument is built from, so other crates never repeat the
//! literal code strings.

// =============================================================================
// Question codes
// =============================================================================

/// Living situation today (LOINC 71802-3).
pub const LIVING_SITUATION: &str = "71802-3";

/// Problems with the place you live (LOINC 96778-6).
pub const HOUSING_PROBLEMS: &str = "96778-6";

/// Utility company threatened to shut off services (LOINC 96779-4).
pub const UTILITY_SHUTOFF: &str = "96779-4";

/// Worried food would run out before money to buy more (LOINC 88122-7).
pub const FOOD_WORRY: &str = "88122-7";

/// Food bought did not last and no money for more (LOINC 88123-5).
pub const FOOD_DID_NOT_LAST: &str = "88123-5";

/// Lack of reliable transportation (LOINC 93030-5).
pub const TRANSPORTATION_BARRIER: &str = "93030-5";

/// Wants help finding or keeping work (LOINC 96780-2).
pub const EMPLOYMENT_HELP: &str = "96780-2";

/// Wants help with school or training (LOINC 96782-8).
pub const EDUCATION_HELP: &str = "96782-8";

// =============================================================================
// Safety question codes (interpersonal violence screen)
// =============================================================================

/// How often does anyone physically hurt you (LOINC 95618-5).
pub const PHYSICALLY_HURT: &str = "95618-5";

/// How often does anyone insult or talk down to you (LOINC 95617-7).
pub const INSULT_OR_TALK_DOWN: &str = "95617-7";

/// How often does anyone threaten you with harm (LOINC 95616-9).
pub const THREATEN_WITH_HARM: &str = "95616-9";

/// How often does anyone scream or curse at you (LOINC 95615-1).
pub const SCREAM_OR_CURSE: &str = "95615-1";

/// Total safety score, pre-aggregated by the screening platform (LOINC 95614-4).
pub const TOTAL_SAFETY_SCORE: &str = "95614-4";

// =============================================================================
// Answer codes
// =============================================================================

/// Never (LOINC answer LA6270-8). Severity 1 on the frequency scale.
pub const ANSWER_NEVER: &str = "LA6270-8";

/// Rarely (LOINC answer LA10066-1). Severity 2 on the frequency scale.
pub const ANSWER_RARELY: &str = "LA10066-1";

/// Sometimes (LOINC answer LA10082-8). Severity 3 on the frequency scale.
pub const ANSWER_SOMETIMES: &str = "LA10082-8";

/// Fairly often (LOINC answer LA16644-9). Severity 4 on the frequency scale.
pub const ANSWER_FAIRLY_OFTEN: &str = "LA16644-9";

/// Frequently (LOINC answer LA6482-9). Severity 5 on the frequency scale.
pub const ANSWER_FREQUENTLY: &str = "LA6482-9";

/// Yes (LOINC answer LA33-6). Positive answer for several yes/no questions.
pub const ANSWER_YES: &str = "LA33-6";
