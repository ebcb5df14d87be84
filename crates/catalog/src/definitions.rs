//! Static data for the NY State 12-question HRSN screener.

use crate::codes;
use crate::question::{QuestionDefinition, SdohCategory};
use std::collections::HashMap;

/// The shared frequency scale used by all four safety questions.
fn frequency_severity() -> HashMap<String, u32> {
    HashMap::from([
        (codes::ANSWER_NEVER.to_string(), 1),
        (codes::ANSWER_RARELY.to_string(), 2),
        (codes::ANSWER_SOMETIMES.to_string(), 3),
        (codes::ANSWER_FAIRLY_OFTEN.to_string(), 4),
        (codes::ANSWER_FREQUENTLY.to_string(), 5),
    ])
}

fn need_question(
    code: &str,
    text: &str,
    categories: Vec<SdohCategory>,
    positive_answers: &[&str],
) -> QuestionDefinition {
    QuestionDefinition {
        code: code.to_string(),
        text: text.to_string(),
        categories,
        positive_answers: Some(positive_answers.iter().map(|s| s.to_string()).collect()),
        severity: None,
        safety_total: false,
    }
}

fn safety_question(code: &str, text: &str) -> QuestionDefinition {
    QuestionDefinition {
        code: code.to_string(),
        text: text.to_string(),
        categories: vec![SdohCategory::Unspecified],
        positive_answers: None,
        severity: Some(frequency_severity()),
        safety_total: false,
    }
}

/// All screener questions in instrument order, safety total last.
pub(crate) fn screener_questions() -> Vec<QuestionDefinition> {
    vec![
        need_question(
            codes::LIVING_SITUATION,
            "What is your living situation today",
            vec![SdohCategory::HousingInstability, SdohCategory::Homelessness],
            // Worried about losing it, no steady place
            &["LA31994-9", "LA31995-6"],
        ),
        need_question(
            codes::HOUSING_PROBLEMS,
            "Think about the place you live. Do you have problems with any of the following",
            vec![SdohCategory::InadequateHousing],
            &[
                "LA31996-4", "LA28580-1", "LA31997-2", "LA31998-0", "LA31999-8", "LA32000-4",
                "LA32001-2",
            ],
        ),
        need_question(
            codes::UTILITY_SHUTOFF,
            "In the past 12 months has the electric, gas, oil, or water company threatened to \
             shut off services in your home",
            vec![SdohCategory::UtilityInsecurity],
            // Yes, already shut off
            &[codes::ANSWER_YES, "LA32002-0"],
        ),
        need_question(
            codes::FOOD_WORRY,
            "Within the past 12 months, you worried that your food would run out before you got \
             money to buy more",
            vec![SdohCategory::FoodInsecurity],
            // Often true, sometimes true
            &["LA28397-0", "LA6729-3"],
        ),
        need_question(
            codes::FOOD_DID_NOT_LAST,
            "Within the past 12 months, the food you bought just didn't last and you didn't have \
             money to get more",
            vec![SdohCategory::FoodInsecurity],
            &["LA28397-0", "LA6729-3"],
        ),
        need_question(
            codes::TRANSPORTATION_BARRIER,
            "In the past 12 months, has lack of reliable transportation kept you from medical \
             appointments, meetings, work or from getting things needed for daily living",
            vec![SdohCategory::TransportationInsecurity],
            &[codes::ANSWER_YES],
        ),
        need_question(
            codes::EMPLOYMENT_HELP,
            "Do you want help finding or keeping work or a job",
            vec![SdohCategory::EmploymentStatus],
            // Help finding work, help keeping work
            &["LA31981-6", "LA31982-4"],
        ),
        need_question(
            codes::EDUCATION_HELP,
            "Do you want help with school or training. For example, starting or completing job \
             training or getting a high school diploma, GED or equivalent",
            vec![SdohCategory::Unspecified],
            &[codes::ANSWER_YES],
        ),
        safety_question(
            codes::PHYSICALLY_HURT,
            "How often does anyone, including family and friends, physically hurt you",
        ),
        safety_question(
            codes::INSULT_OR_TALK_DOWN,
            "How often does anyone, including family and friends, insult or talk down to you",
        ),
        safety_question(
            codes::THREATEN_WITH_HARM,
            "How often does anyone, including family and friends, threaten you with harm",
        ),
        safety_question(
            codes::SCREAM_OR_CURSE,
            "How often does anyone, including family and friends, scream or curse at you",
        ),
        QuestionDefinition {
            code: codes::TOTAL_SAFETY_SCORE.to_string(),
            text: "Total Safety Score".to_string(),
            categories: vec![SdohCategory::Unspecified],
            positive_answers: None,
            severity: None,
            safety_total: true,
        },
    ]
}
