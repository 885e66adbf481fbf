//! Plain-text rendering of form state, cohort summaries and cluster overviews.

use survey_cohort::{ClusterOverview, CohortSummary, Evaluation, FrequencyTable, LabeledRespondent};
use survey_data::{Attribute, RespondentDraft};

/// Widest bar drawn by [`bar_chart`].
pub const BAR_WIDTH: usize = 40;

/// Form caption shown next to each field.
pub fn field_caption(attribute: Attribute) -> &'static str {
    match attribute {
        Attribute::Age => "Przedział wiekowy",
        Attribute::EduLevel => "Wykształcenie",
        Attribute::FavAnimals => "Ulubione zwierzę",
        Attribute::FavPlace => "Ulubione miejsce",
        Attribute::Gender => "Płeć",
    }
}

/// Chart title and category axis caption.
pub fn chart_titles(attribute: Attribute) -> (&'static str, &'static str) {
    match attribute {
        Attribute::Age => ("Rozkład wieku", "Wiek"),
        Attribute::EduLevel => ("Wykształcenie osób z grupy", "Wykształcenie"),
        Attribute::FavAnimals => ("Ulubione zwierzę", "Zwierzę"),
        Attribute::FavPlace => ("Ulubione miejsce wypoczynku", "Miejsce"),
        Attribute::Gender => ("Płeć", "Płeć"),
    }
}

/// One line per bucket: label, `#` bar scaled to the largest bucket, count.
pub fn bar_chart(table: &FrequencyTable, max_width: usize) -> Vec<String> {
    if max_width == 0 || table.is_empty() {
        return Vec::new();
    }
    let max_count = table.max_count();
    let label_width = table
        .buckets
        .iter()
        .map(|b| b.value.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = Vec::with_capacity(table.buckets.len());
    for bucket in &table.buckets {
        let bar_len = if max_count == 0 {
            0
        } else {
            (bucket.count * max_width) / max_count
        };
        let mut line = format!("{:<label_width$} | ", bucket.value);
        line.push_str(&"#".repeat(bar_len));
        line.push_str(&format!(" ({})", bucket.count));
        lines.push(line);
    }
    lines
}

fn chart(table: &FrequencyTable) -> Vec<String> {
    let (title, axis) = chart_titles(table.attribute);
    let mut out = vec![title.to_string(), format!("{axis} / Liczba osób")];
    out.extend(bar_chart(table, BAR_WIDTH).into_iter().map(|l| format!("  {l}")));
    out
}

pub fn sample_table(rows: &[LabeledRespondent]) -> Vec<String> {
    let header: Vec<&str> = Attribute::ALL.iter().map(|a| a.column()).collect();
    let cells: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| Attribute::ALL.iter().map(|a| r.respondent.label(*a)).collect())
        .collect();
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let format_row = |row: &[&str]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let mut out = vec![format_row(header.as_slice())];
    out.extend(cells.iter().map(|row| format_row(row.as_slice())));
    out
}

pub fn render_summary(summary: &CohortSummary) -> Vec<String> {
    let mut out = vec![
        format!("Najbliżej Ci do grupy {}", summary.profile.name),
        summary.profile.description.clone(),
        String::new(),
        format!("Liczba Twoich znajomych: {}", summary.size),
        format!("Stanowicie ok. {}% wszystkich ankietowanych!", summary.share),
        String::new(),
        "Więcej o Twoich znajomych".to_string(),
        format!("{} losowych wierszy", summary.sample.len()),
    ];
    if !summary.sample.is_empty() {
        out.extend(sample_table(&summary.sample));
    }
    for table in &summary.distributions {
        out.push(String::new());
        out.extend(chart(table));
    }
    out
}

pub fn render_incomplete(missing: &[Attribute]) -> Vec<String> {
    let fields: Vec<String> = missing
        .iter()
        .map(|a| format!("{} ({})", field_caption(*a), a.column()))
        .collect();
    vec![
        "Powiedz coś o sobie...".to_string(),
        "Wybierz jedną wartość w każdym z pól, abyśmy mogli Cię zakwalifikować do jakiejś grupy."
            .to_string(),
        format!("Brakuje: {}", fields.join(", ")),
    ]
}

pub fn render_evaluation(evaluation: &Evaluation) -> Vec<String> {
    match evaluation {
        Evaluation::Incomplete { missing } => render_incomplete(missing),
        Evaluation::Classified(summary) => render_summary(summary),
    }
}

/// Current answers, one field per line.
pub fn render_draft(draft: &RespondentDraft) -> Vec<String> {
    Attribute::ALL
        .iter()
        .map(|a| {
            let value = draft.get(*a).unwrap_or("-");
            format!("{:<18} {:<12} {value}", field_caption(*a), a.column())
        })
        .collect()
}

/// Allowed values of a field, numbered from 1.
pub fn render_options(attribute: Attribute) -> Vec<String> {
    let mut out = vec![format!("{} ({}):", field_caption(attribute), attribute.column())];
    out.extend(
        attribute
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| format!("  {}. {label}", i + 1)),
    );
    out
}

pub fn render_overview(overview: &[ClusterOverview]) -> Vec<String> {
    overview
        .iter()
        .map(|o| {
            format!(
                "{}: {} - {} osób ({}%)",
                o.cluster, o.profile.name, o.size, o.share
            )
        })
        .collect()
}
