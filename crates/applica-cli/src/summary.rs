use applica_cli::report::FillRun;
use applica_fill::{ControlKind, ControlState, ElementId, FieldResolution, Resolution, SkipReason};
use applica_model::FillOutcome;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

pub fn print_fill_summary(run: &FillRun) {
    println!("Page: {}", run.page.display());
    let Some(report) = &run.report else {
        if let FillOutcome::Failed { error } = &run.outcome {
            eprintln!("error: {error}");
        }
        return;
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("State"),
        header_cell("Element"),
        header_cell("Kind"),
        header_cell("Value"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for field in &report.fields {
        table.add_row(field_row(field, run));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} of {} filled", report.filled, report.total))
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn field_row(field: &FieldResolution, run: &FillRun) -> Vec<Cell> {
    let key = Cell::new(&field.key)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold);
    match &field.resolution {
        Resolution::Matched {
            element,
            kind,
            filled,
        } => {
            let state = if *filled {
                Cell::new("filled").fg(Color::Green)
            } else {
                Cell::new("no option").fg(Color::Yellow)
            };
            vec![
                key,
                state,
                Cell::new(element),
                kind_cell(*kind),
                value_cell(control_for(run, *element)),
            ]
        }
        Resolution::Exhausted => vec![
            key,
            Cell::new("unmatched").fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ],
        Resolution::Skipped { reason } => {
            let label = match reason {
                SkipReason::NullValue => "null",
                SkipReason::UnknownField => "unknown key",
            };
            vec![
                key,
                dim_cell(label),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]
        }
    }
}

fn control_for(run: &FillRun, element: ElementId) -> Option<&ControlState> {
    run.controls
        .iter()
        .find(|control| control.element == element)
}

fn value_cell(control: Option<&ControlState>) -> Cell {
    match control {
        Some(ControlState {
            checked: Some(checked),
            ..
        }) => Cell::new(if *checked { "checked" } else { "unchecked" }),
        Some(ControlState {
            value: Some(value),
            ..
        }) if !value.is_empty() => Cell::new(value),
        _ => dim_cell("-"),
    }
}

pub fn kind_cell(kind: ControlKind) -> Cell {
    match kind {
        ControlKind::Select => Cell::new(kind).fg(Color::Magenta),
        ControlKind::Checkbox | ControlKind::Radio => Cell::new(kind).fg(Color::Cyan),
        ControlKind::Text | ControlKind::TextArea => Cell::new(kind),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
