//! Console renderings of the two view surfaces.

use client_core::{AdminView, Field, RenderedRow, StatusKind, SubmissionView};

pub struct ConsoleSubmissionView;

impl SubmissionView for ConsoleSubmissionView {
    fn status(&self, kind: StatusKind, message: &str) {
        match kind {
            StatusKind::Error => eprintln!("{message}"),
            StatusKind::Neutral | StatusKind::Success => println!("{message}"),
        }
    }

    fn field_error(&self, field: Field, message: &str) {
        eprintln!("  {}: {message}", field.wire_name());
    }

    fn field_error_cleared(&self, _field: Field) {}

    fn all_errors_cleared(&self) {}

    fn submit_enabled(&self, _enabled: bool) {}

    fn form_reset(&self) {}
}

pub struct ConsoleAdminView;

const HEADERS: [&str; 9] = [
    "id",
    "nome",
    "email",
    "telefone",
    "cargo",
    "escolaridade",
    "enviado em",
    "download",
    "ip",
];

impl AdminView for ConsoleAdminView {
    fn status(&self, message: &str) {
        println!("{message}");
    }

    fn placeholder(&self, message: &str) {
        println!("  {message}");
    }

    fn rows(&self, rows: &[RenderedRow]) {
        let table: Vec<[String; 9]> = rows
            .iter()
            .map(|row| {
                [
                    row.id.0.to_string(),
                    row.nome.clone(),
                    row.email.clone(),
                    row.telefone.clone(),
                    row.cargo.clone(),
                    row.escolaridade.clone(),
                    row.enviado_em.clone(),
                    row.download_href.clone(),
                    row.ip.clone(),
                ]
            })
            .collect();

        let mut widths: [usize; 9] = HEADERS.map(str::len);
        for line in &table {
            for (width, cell) in widths.iter_mut().zip(line.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        print_line(&HEADERS.map(String::from), &widths);
        for line in &table {
            print_line(line, &widths);
        }
    }
}

fn print_line(cells: &[String; 9], widths: &[usize; 9]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}
