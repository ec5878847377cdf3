use crate::model::{Employee, GlyphStyle, Roster, Tier};
use crate::schedule::Schedule;
use crate::summary::DailySummary;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Signature UTF-8 attendue par les tableurs.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DATE_FMT: &str = "%Y-%m-%d";

/// Import du roster depuis CSV: header `name,tier[,roles][,vacations]`
///
/// `roles` et `vacations` sont séparés par `;`, une période de congés s'écrit
/// `2025-06-10..2025-06-12` (bornes incluses).
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut employees = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid roster row (empty name)");
        }
        let tier = parse_tier(rec.get(1).unwrap_or("").trim())
            .with_context(|| format!("invalid tier for {name}"))?;
        let mut employee = match tier {
            Tier::Primary => Employee::new(name),
            Tier::Secondary => Employee::secondary(name),
        };
        if let Some(roles) = rec.get(2) {
            employee = employee.with_roles(
                roles
                    .split(';')
                    .map(str::trim)
                    .filter(|r| !r.is_empty()),
            );
        }
        if let Some(vacations) = rec.get(3) {
            let vacations = vacations.trim();
            if !vacations.is_empty() {
                employee.vacations = parse_vacations(vacations)
                    .with_context(|| format!("invalid vacations value for {name}"))?;
            }
        }
        employees.push(employee);
    }
    Ok(Roster::new(employees)?)
}

fn parse_tier(s: &str) -> anyhow::Result<Tier> {
    match s.to_ascii_lowercase().as_str() {
        "" | "primary" | "p" | "ft" => Ok(Tier::Primary),
        "secondary" | "s" | "pt" => Ok(Tier::Secondary),
        _ => bail!("expected primary or secondary"),
    }
}

fn parse_vacations(raw: &str) -> anyhow::Result<BTreeSet<NaiveDate>> {
    let mut out = BTreeSet::new();
    for chunk in raw.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some((start_raw, end_raw)) = chunk.split_once("..").or_else(|| chunk.split_once('/'))
        {
            let start = parse_date(start_raw.trim())?;
            let end = parse_date(end_raw.trim())?;
            if end < start {
                bail!("vacation range {chunk} ends before it starts");
            }
            out.extend(start.iter_days().take_while(|d| *d <= end));
        } else {
            out.insert(parse_date(chunk)?);
        }
    }
    Ok(out)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FMT).with_context(|| format!("invalid date: {raw}"))
}

/// Écrit le planning en CSV : BOM, ligne d'en-tête des dates ISO, une ligne par employé.
pub fn write_schedule_csv<W: Write>(
    mut out: W,
    schedule: &Schedule,
    style: GlyphStyle,
) -> anyhow::Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut w = WriterBuilder::new().from_writer(out);

    let header: Vec<String> = std::iter::once(String::new())
        .chain(schedule.dates.iter().map(|d| d.format(DATE_FMT).to_string()))
        .collect();
    w.write_record(&header)?;

    for row in &schedule.rows {
        let cells = std::iter::once(row.employee.as_str())
            .chain(row.labels.iter().map(|label| style.glyph(*label)));
        w.write_record(cells)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    style: GlyphStyle,
) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    write_schedule_csv(&mut buf, schedule, style)?;
    write_atomic(path, &buf)
}

/// Export CSV du décompte: header `date,working`
pub fn export_summary_csv<P: AsRef<Path>>(path: P, summary: &DailySummary) -> anyhow::Result<()> {
    let mut buf = Vec::from(UTF8_BOM);
    {
        let mut w = WriterBuilder::new().from_writer(&mut buf);
        w.write_record(["date", "working"])?;
        let mut count = itoa::Buffer::new();
        for day in &summary.days {
            let date = day.date.format(DATE_FMT).to_string();
            w.write_record([date.as_str(), count.format(day.working)])?;
        }
        w.flush()?;
    }
    write_atomic(path, &buf)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(schedule)?;
    write_atomic(path, &json)
}

/// Écriture atomique : fichier temporaire voisin puis renommage.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
