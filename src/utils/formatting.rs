use crate::model::{Measurement, Patient};

const MAX_LABEL_LEN: usize = 48;

pub fn format_measurement(measurement: &Measurement) -> String {
    match measurement.unit.as_deref().map(str::trim) {
        Some(unit) if !unit.is_empty() => format!("{} {unit}", measurement.value),
        _ => measurement.value.to_string(),
    }
}

pub fn patient_summary(patient: &Patient) -> String {
    let breed = patient
        .breed
        .as_deref()
        .map(str::trim)
        .filter(|breed| !breed.is_empty())
        .unwrap_or("Unknown breed");
    match patient.age.as_deref().map(str::trim) {
        Some(age) if !age.is_empty() => format!("{breed}, {age}"),
        _ => breed.to_string(),
    }
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{count} {noun}")
}

pub fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_LABEL_LEN {
        let mut truncated = text.chars().take(MAX_LABEL_LEN).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        text.to_string()
    }
}
