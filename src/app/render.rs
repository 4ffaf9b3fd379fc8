use crate::app::page::{DirectoryPage, PageView};
use crate::core::{ConsultationMode, Navigator, PractitionerRecord, SortKey};
use std::fmt::Write;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const NO_MATCH_MESSAGE: &str =
    "No doctors match your search criteria. Try adjusting your filters.";

/// Renders the whole page: search box, suggestions, filter panel and results.
pub fn render_page<N: Navigator>(page: &DirectoryPage<N>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🔎 Search doctors by name: [{}]", page.search_input());
    for (i, record) in page.suggestions().iter().enumerate() {
        let _ = writeln!(out, "   {}. {} ({})", i + 1, record.name, record.specialties.join(", "));
    }
    out.push('\n');

    out.push_str(&render_filter_panel(page));
    out.push('\n');
    out.push_str(&render_results(&page.view()));
    out
}

pub fn render_filter_panel<N: Navigator>(page: &DirectoryPage<N>) -> String {
    let state = page.query_state();
    let panel = page.panel();
    let mut out = String::from("Filters\n");

    let _ = writeln!(out, "{} Speciality", chevron(panel.specialty));
    if panel.specialty {
        for specialty in page.specialty_options() {
            let checked = state.specialties.contains(&specialty);
            let _ = writeln!(out, "  {} {}", checkbox(checked), specialty);
        }
    }

    let _ = writeln!(out, "{} Consultation Mode", chevron(panel.consultation));
    if panel.consultation {
        for mode in ConsultationMode::ALL {
            let _ = writeln!(out, "  {} {}", radio(state.consultation_mode == Some(mode)), mode);
        }
    }

    let _ = writeln!(out, "{} Sort By", chevron(panel.sort));
    if panel.sort {
        for key in SortKey::ALL {
            let _ = writeln!(out, "  {} {}", radio(state.sort_key == Some(key)), key.label());
        }
    }

    out
}

pub fn render_results(view: &PageView<'_>) -> String {
    match view {
        PageView::Loading => "⏳ Loading doctors...\n".to_string(),
        PageView::Error(message) => format!("❌ {}\n", message),
        PageView::Empty => format!("{}\n", NO_MATCH_MESSAGE),
        PageView::Results(records) => {
            let noun = if records.len() == 1 { "Doctor" } else { "Doctors" };
            let mut out = format!("{} {} Found\n\n", records.len(), noun);
            for record in records {
                out.push_str(&render_card(record));
                out.push('\n');
            }
            out
        }
    }
}

pub fn render_card(record: &PractitionerRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", record.name);
    let _ = writeln!(out, "  {}", record.specialties.join(", "));
    let _ = writeln!(out, "  {} yrs exp", record.experience_years);
    if !record.qualifications.is_empty() {
        let _ = writeln!(out, "  {}", record.qualifications.join(", "));
    }
    if let Some(clinic) = &record.clinic_name {
        let _ = writeln!(out, "  🏥 {}", clinic);
    }
    if let Some(city) = &record.clinic_city {
        let _ = writeln!(out, "  📍 {}", city);
    }
    let _ = writeln!(
        out,
        "  🖼 {}",
        record.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    );
    let _ = writeln!(out, "  ₹{}  [Book Appointment]", record.fee_amount);

    out
}

fn chevron(expanded: bool) -> &'static str {
    if expanded {
        "▾"
    } else {
        "▸"
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn radio(selected: bool) -> &'static str {
    if selected {
        "(•)"
    } else {
        "( )"
    }
}
