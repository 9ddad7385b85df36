//! Table and card projections of the record collection
//!
//! Columns and card fields follow schema order. Cells come straight from the
//! record by field name; the renderer never special-cases a field.

use crate::record::{Record, RecordId};
use crate::schema::FieldSchema;

/// User intent raised from a row or card
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowIntent {
    Edit(RecordId),
    Delete(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RecordId,
    /// One cell per column, same order
    pub cells: Vec<String>,
    /// Accessible label of the edit trigger, e.g. "Edit Jo Lee"
    pub edit_label: String,
    pub delete_label: String,
}

impl Row {
    pub fn edit(&self) -> RowIntent {
        RowIntent::Edit(self.id.clone())
    }

    pub fn delete(&self) -> RowIntent {
        RowIntent::Delete(self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: RecordId,
    pub fields: Vec<CardField>,
}

/// Placeholder shown instead of an empty table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub heading: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// e.g. "Users (3)"
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub cards: Vec<Card>,
    pub empty: Option<EmptyState>,
}

impl TableView {
    pub fn project(schema: &FieldSchema, records: &[Record]) -> Self {
        let names = schema.names();

        let columns = schema
            .iter()
            .map(|f| Column {
                name: f.name.clone(),
                label: f.label.clone(),
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                let display = schema
                    .display_name(record.attributes())
                    .unwrap_or_else(|| record.id.to_string());
                Row {
                    id: record.id.clone(),
                    cells: schema.iter().map(|f| record.value(&f.name).to_string()).collect(),
                    edit_label: format!("Edit {display}"),
                    delete_label: format!("Delete {display}"),
                }
            })
            .collect();

        let cards = records
            .iter()
            .map(|record| Card {
                id: record.id.clone(),
                fields: schema
                    .iter()
                    .map(|f| CardField {
                        label: f.label.clone(),
                        value: record.value(&f.name).to_string(),
                    })
                    .collect(),
            })
            .collect();

        let empty = records.is_empty().then(|| EmptyState {
            heading: format!("No {} yet", names.plural),
            hint: format!("Add your first {} using the form above", names.singular),
        });

        Self {
            title: format!("{} ({})", names.plural_title(), records.len()),
            columns,
            rows,
            cards,
            empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain-text table with a leading id column, for terminals
    pub fn render_text(&self) -> String {
        if let Some(empty) = &self.empty {
            return format!("{}\n{}\n", empty.heading, empty.hint);
        }

        let mut header = vec!["ID".to_string()];
        header.extend(self.columns.iter().map(|c| c.label.clone()));

        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut line = vec![row.id.to_string()];
                line.extend(row.cells.iter().cloned());
                line
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = format!("{}\n", self.title);
        out.push_str(&format_line(&header, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format_line(&rule, &widths));
        for line in &body {
            out.push_str(&format_line(line, &widths));
        }
        out
    }

    /// One block per record, one aligned line per field
    pub fn render_cards_text(&self) -> String {
        if let Some(empty) = &self.empty {
            return format!("{}\n{}\n", empty.heading, empty.hint);
        }

        let label_width = self
            .columns
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = format!("{}\n", self.title);
        for card in &self.cards {
            out.push_str(&format!("\n[{}]\n", card.id));
            for field in &card.fields {
                out.push_str(&format!("  {:<label_width$}  {}\n", field.label, field.value));
            }
        }
        out
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}
