use panel_core::{
    CategoryPanelView, ControlView, DetailView, PanelViewModel, ProductSummary, RowView, Tone,
};

pub fn render(view: &PanelViewModel) -> Vec<String> {
    let mut lines = vec![
        "== Compliance panel ==".to_string(),
        summary_line(&view.summary, view.in_flight),
        String::new(),
        format!("-- Products ({}) --", view.products.len()),
    ];
    let overview_index = view.overview.as_ref().map(|detail| detail.index);
    lines.extend(row_lines(&view.products, overview_index));
    if let Some(detail) = &view.overview {
        lines.extend(detail_lines(detail));
    }

    for panel in &view.panels {
        lines.push(String::new());
        lines.extend(panel_lines(panel));
    }
    lines
}

fn summary_line(summary: &ProductSummary, in_flight: usize) -> String {
    format!(
        "Products: {} | Owners: {} | Stale (>{}h): {} | Heavy users (>{}): {} | Name issues: {} | Unauthorized: {} | In flight: {}",
        summary.total_products,
        summary.distinct_owners,
        summary.stale_threshold_hours,
        summary.stale_products,
        summary.high_product_count_threshold,
        summary.heavy_users,
        summary.name_discrepancies,
        summary.unauthorized_users,
        in_flight
    )
}

fn panel_lines(panel: &CategoryPanelView) -> Vec<String> {
    let mut lines = vec![format!(
        "-- {} [{}] ({}) -- {}",
        panel.category.title(),
        panel.category,
        panel.rows.len(),
        control_label(&panel.bulk)
    )];
    if panel.rows.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(row_lines(&panel.rows, panel.selected));
    if let Some(detail) = &panel.detail {
        lines.extend(detail_lines(detail));
    }
    if let Some(alert) = &panel.alert {
        lines.push(format!(
            "    {} -> {}",
            control_label(&alert.control),
            sanitize(&alert.email)
        ));
    }
    lines
}

fn row_lines(rows: &[RowView], selected: Option<usize>) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mark = if selected == Some(row.index) { "(*)" } else { "( )" };
            format!("  {mark} {:>3} {}", row.index, sanitize(&row.label))
        })
        .collect()
}

fn detail_lines(detail: &DetailView) -> Vec<String> {
    let mut lines: Vec<String> = detail
        .fields
        .iter()
        .map(|field| {
            let value = sanitize(&field.value);
            if field.emphasis {
                format!("    {}: *{}*", field.label, value)
            } else {
                format!("    {}: {}", field.label, value)
            }
        })
        .collect();
    if !detail.payload_json.is_empty() {
        lines.push("    Payload:".to_string());
        lines.extend(
            detail
                .payload_json
                .lines()
                .map(|line| format!("      {line}")),
        );
    }
    lines
}

fn control_label(control: &ControlView) -> String {
    let label = match control.tone {
        Tone::Normal => format!("[{}]", control.label),
        Tone::Warning => format!("[!! {} !!]", control.label),
    };
    if control.enabled {
        label
    } else {
        format!("{label} (disabled)")
    }
}

/// Record values come from the catalog; strip control characters so they
/// cannot drive the terminal.
fn sanitize(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_control()).collect()
}
