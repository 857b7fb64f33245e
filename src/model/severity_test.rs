use super::*;

fn observation(organ: &str, note: &str) -> Observation {
    Observation {
        organ: organ.to_string(),
        note: note.to_string(),
    }
}

#[test]
fn unremarkable_notes_are_normal() {
    for note in [
        "Silueta cardíaca normal",
        "Sin hallazgos relevantes",
        "Arquitectura conservada",
        "Bordes conservados",
        "Proporciones conservadas",
        "Valores normales",
        "Diafragma íntegro",
    ] {
        assert_eq!(classify_observation(note), Severity::Normal, "{note}");
    }
}

#[test]
fn classification_ignores_case() {
    assert_eq!(classify_observation("NORMAL"), Severity::Normal);
    assert_eq!(classify_observation("Cambio GRAVE"), Severity::Critical);
    assert_eq!(classify_observation("Aumento LEVE"), Severity::Warning);
}

#[test]
fn change_keywords_are_warning() {
    assert_eq!(classify_observation("Hepatomegalia leve"), Severity::Warning);
    assert_eq!(classify_observation("Derrame moderado"), Severity::Warning);
    assert_eq!(classify_observation("Disminución del tamaño renal"), Severity::Warning);
}

#[test]
fn severe_keywords_are_critical() {
    assert_eq!(classify_observation("Cardiomegalia severa"), Severity::Critical);
    assert_eq!(classify_observation("Patrón marcado"), Severity::Critical);
    assert_eq!(classify_observation("Requiere emergencia"), Severity::Critical);
}

#[test]
fn unremarkable_keywords_take_precedence_over_severe_ones() {
    assert_eq!(
        classify_observation("Tamaño normal, sin cambio grave"),
        Severity::Normal
    );
    assert_eq!(
        classify_observation("Sin hallazgos de emergencia"),
        Severity::Normal
    );
}

#[test]
fn change_keywords_take_precedence_over_severe_ones() {
    assert_eq!(
        classify_observation("Aumento marcado de la ecogenicidad"),
        Severity::Warning
    );
}

#[test]
fn unmatched_text_defaults_to_warning() {
    assert_eq!(classify_observation(""), Severity::Warning);
    assert_eq!(classify_observation("Imagen compatible con quiste"), Severity::Warning);
}

#[test]
fn classification_is_repeatable() {
    let note = "Engrosamiento significativo de la pared";
    assert_eq!(classify_observation(note), classify_observation(note));
}

#[test]
fn summary_counts_each_class() {
    let observations = vec![
        observation("Corazón", "Normal"),
        observation("Pulmón", "Patrón severo"),
        observation("Hígado", "Aumento leve"),
        observation("Bazo", "Sin hallazgos"),
    ];
    assert_eq!(
        SeveritySummary::from_observations(&observations),
        SeveritySummary {
            total: 4,
            normal: 2,
            warning: 1,
            critical: 1,
        }
    );
}

#[test]
fn grouping_keeps_first_appearance_order() {
    let observations = vec![
        observation("Hígado", "a"),
        observation("Bazo", "b"),
        observation("Hígado", "c"),
    ];
    let groups = group_by_organ(&observations);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Hígado");
    assert_eq!(
        groups[0].1.iter().map(|o| o.note.as_str()).collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert_eq!(groups[1].0, "Bazo");
}

#[test]
fn chips_keep_short_phrases_only() {
    let chips = keyword_chips(
        "Hepatomegalia leve. Bordes regulares, ecogenicidad aumentada en lóbulo izquierdo; sí",
    );
    assert_eq!(chips, vec!["Hepatomegalia leve", "Bordes regulares"]);
}
