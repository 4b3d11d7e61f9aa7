use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::db::ExportRow;

const COLUMNS: &str = "id,name,description,type,source_url,image_url,image_path";

// Matches the original deployment's dump target (MySQL/phpMyAdmin import).
const SQL_HEADER: &str = "\
-- Table d'export des PANNEAUX (compatible MySQL/phpMyAdmin)
DROP TABLE IF EXISTS `PANNEAUX`;
CREATE TABLE `PANNEAUX` (
  `id` INT NOT NULL AUTO_INCREMENT,
  `name` VARCHAR(255) NOT NULL,
  `description` TEXT NULL,
  `type` VARCHAR(64) NOT NULL,
  `source_url` TEXT NOT NULL,
  `image_url` TEXT NULL,
  `image_path` VARCHAR(255) NULL,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uniq_name_type` (`name`, `type`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;
";

pub fn export_csv(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    std::fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn export_sql(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_sql(&mut buf, rows)?;
    std::fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_csv<W: Write>(w: &mut W, rows: &[ExportRow]) -> Result<()> {
    writeln!(w, "{}", COLUMNS)?;
    for r in rows {
        let fields = [
            r.id.to_string(),
            csv_field(&r.name),
            csv_field(r.description.as_deref().unwrap_or("")),
            csv_field(&r.sign_type),
            csv_field(&r.source_url),
            csv_field(r.image_url.as_deref().unwrap_or("")),
            csv_field(r.image_path.as_deref().unwrap_or("")),
        ];
        writeln!(w, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Quote only when needed; embedded quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_sql<W: Write>(w: &mut W, rows: &[ExportRow]) -> Result<()> {
    w.write_all(SQL_HEADER.as_bytes())?;
    for r in rows {
        writeln!(
            w,
            "INSERT IGNORE INTO `PANNEAUX` (name, description, type, source_url, image_url, image_path) VALUES ({}, {}, {}, {}, {}, {});",
            sql_quote(Some(&r.name)),
            sql_quote(r.description.as_deref()),
            sql_quote(Some(&r.sign_type)),
            sql_quote(Some(&r.source_url)),
            sql_quote(r.image_url.as_deref()),
            sql_quote(r.image_path.as_deref()),
        )?;
    }
    Ok(())
}

/// Single-quoted SQL string with embedded quotes doubled; absent → NULL.
fn sql_quote(value: Option<&str>) -> String {
    match value {
        None => "NULL".to_string(),
        Some(v) => format!("'{}'", v.replace('\'', "''")),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, description: Option<&str>) -> ExportRow {
        ExportRow {
            id: 1,
            name: name.to_string(),
            description: description.map(str::to_string),
            sign_type: "liste_des_panneaux".to_string(),
            source_url: "https://example.org/p".to_string(),
            image_url: None,
            image_path: None,
        }
    }

    fn render_csv(rows: &[ExportRow]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_sql(rows: &[ExportRow]) -> String {
        let mut buf = Vec::new();
        write_sql(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_starts_with_the_expected_header() {
        let out = render_csv(&[]);
        assert_eq!(
            out,
            "id,name,description,type,source_url,image_url,image_path\n"
        );
    }

    #[test]
    fn csv_quotes_fields_containing_commas_and_quotes() {
        let out = render_csv(&[row("Stop", Some("octogone, rouge et \"blanc\""))]);
        let line = out.lines().nth(1).unwrap();
        assert!(line.contains("\"octogone, rouge et \"\"blanc\"\"\""));
        assert!(line.starts_with("1,Stop,"));
    }

    #[test]
    fn csv_renders_absent_values_as_empty_fields() {
        let out = render_csv(&[row("Stop", None)]);
        let line = out.lines().nth(1).unwrap();
        assert_eq!(line, "1,Stop,,liste_des_panneaux,https://example.org/p,,");
    }

    #[test]
    fn sql_escapes_single_quotes_by_doubling() {
        assert_eq!(sql_quote(Some("l'arrêt")), "'l''arrêt'");
        assert_eq!(sql_quote(None), "NULL");
    }

    #[test]
    fn sql_dump_recreates_the_table_then_inserts() {
        let out = render_sql(&[row("Cédez le passage", None)]);
        assert!(out.starts_with("-- Table d'export des PANNEAUX"));
        assert!(out.contains("DROP TABLE IF EXISTS `PANNEAUX`;"));
        assert!(out.contains("UNIQUE KEY `uniq_name_type` (`name`, `type`)"));
        assert!(out.contains(
            "INSERT IGNORE INTO `PANNEAUX` (name, description, type, source_url, image_url, image_path) VALUES ('Cédez le passage', NULL, 'liste_des_panneaux', 'https://example.org/p', NULL, NULL);"
        ));
    }
}
