//! Final-score and letter-grade derivation for KRS records.
//!
//! Component weights: tugas 20%, praktikum 20%, UTS 25%, UAS 35%. The final
//! score and letter are only computed once all four components are in;
//! otherwise both stay NULL in the store and are coalesced at read time.

pub fn final_score(
    tugas: Option<f64>,
    praktikum: Option<f64>,
    uts: Option<f64>,
    uas: Option<f64>,
) -> Option<f64> {
    Some(tugas? * 0.20 + praktikum? * 0.20 + uts? * 0.25 + uas? * 0.35)
}

pub fn letter(score: f64) -> &'static str {
    if score >= 85.0 {
        "A"
    } else if score >= 70.0 {
        "B"
    } else if score >= 55.0 {
        "C"
    } else if score >= 40.0 {
        "D"
    } else {
        "E"
    }
}
