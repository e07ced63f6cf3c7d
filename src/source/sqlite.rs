//! Things 3 SQLite source
//!
//! Reads the `main.sqlite` file the Things Mac app keeps in its group
//! container. The connection is opened read-only; the exporter never
//! writes to the database.
//!
//! Only open (`status = 0`), untrashed items are returned. Repeating
//! to-dos show up through their instances; the templates Things keeps
//! behind them (`rt1_recurrenceRule` set) are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use directories::BaseDirs;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Row};

use super::{Membership, SourceError, TaskQuery, ThingsSource};
use crate::domain::{ChecklistItem, Record, RecordKind};

const GROUP_CONTAINER: &str =
    "Library/Group Containers/JLMPQHK86H.com.culturedcode.ThingsMac";
const DATABASE_FILE: &str = "Things Database.thingsdatabase/main.sqlite";

const TASK_COLUMNS: &str = "t.uuid, t.type, t.title, t.notes, t.start, t.startDate, \
     t.deadline, t.\"index\", t.area, a.title, t.project, t.heading";

/// Locates the Things database in the current user's group container
pub fn default_database_path() -> Result<PathBuf, SourceError> {
    let home = BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(SourceError::NoDefaultDatabase)?;
    let container = home.join(GROUP_CONTAINER);

    // Things 3.15+ keeps the database in a `ThingsData-XXXXX` subdirectory
    if let Ok(entries) = fs::read_dir(&container) {
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("ThingsData-"))
            .map(|e| e.path().join(DATABASE_FILE))
            .filter(|p| p.is_file())
            .collect();
        candidates.sort();
        if let Some(path) = candidates.into_iter().next() {
            return Ok(path);
        }
    }

    let legacy = container.join(DATABASE_FILE);
    if legacy.is_file() {
        Ok(legacy)
    } else {
        Err(SourceError::NoDefaultDatabase)
    }
}

/// Things 3 database opened read-only
pub struct ThingsDatabase {
    conn: Connection,
}

impl ThingsDatabase {
    /// Opens the database file at `path`
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Opens the database at its default location
    pub fn open_default() -> Result<Self, SourceError> {
        Self::open(&default_database_path()?)
    }

    /// Wraps an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn query_tasks(&self, query: &TaskQuery, uuid: Option<&str>) -> Result<Vec<Record>, SourceError> {
        let mut sql = format!(
            "SELECT {TASK_COLUMNS} FROM TMTask t LEFT JOIN TMArea a ON a.uuid = t.area \
             WHERE t.trashed = 0 AND t.status = 0 AND t.rt1_recurrenceRule IS NULL"
        );
        let mut args: Vec<String> = Vec::new();

        if let Some(uuid) = uuid {
            sql.push_str(" AND t.uuid = ?");
            args.push(uuid.to_string());
        }
        if let Some(kind) = query.kind {
            match type_code(kind) {
                Some(code) => sql.push_str(&format!(" AND t.type = {code}")),
                None => return Ok(Vec::new()),
            }
        }
        push_membership(&mut sql, &mut args, "t.area", &query.area);
        push_membership(&mut sql, &mut args, "t.project", &query.project);
        push_membership(&mut sql, &mut args, "t.heading", &query.heading);
        sql.push_str(" ORDER BY t.\"index\"");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), read_task_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_record().and_then(|r| self.materialize(r)))
            .collect()
    }

    fn materialize(&self, mut record: Record) -> Result<Record, SourceError> {
        if !record.is_area() {
            record.tags = self.tags_for(&record.uuid)?;
        }
        let owner = Membership::Within(record.uuid.clone());
        match record.kind {
            Some(RecordKind::ToDo) => record.checklist = self.checklist_for(&record.uuid)?,
            Some(RecordKind::Project) => {
                record.items = self.query_tasks(&TaskQuery::default().project(owner), None)?
            }
            Some(RecordKind::Heading) => {
                record.items = self.query_tasks(
                    &TaskQuery::of_kind(RecordKind::ToDo).heading(owner),
                    None,
                )?
            }
            Some(RecordKind::Area) => {
                record.items = self.query_tasks(&TaskQuery::default().area(owner), None)?
            }
            None => {}
        }
        Ok(record)
    }

    fn tags_for(&self, uuid: &str) -> Result<Vec<String>, SourceError> {
        let mut stmt = self.conn.prepare(
            "SELECT tag.title FROM TMTaskTag tt JOIN TMTag tag ON tag.uuid = tt.tags \
             WHERE tt.tasks = ?1 ORDER BY tag.title",
        )?;
        let tags = stmt
            .query_map(params![uuid], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(tags)
    }

    fn checklist_for(&self, uuid: &str) -> Result<Vec<ChecklistItem>, SourceError> {
        let mut stmt = self.conn.prepare(
            "SELECT title FROM TMChecklistItem WHERE task = ?1 ORDER BY \"index\"",
        )?;
        let items = stmt
            .query_map(params![uuid], |row| Ok(ChecklistItem::new(row.get::<_, String>(0)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn area_record(&self, uuid: String, title: String) -> Result<Record, SourceError> {
        self.materialize(Record::area(uuid, title))
    }
}

impl ThingsSource for ThingsDatabase {
    fn task(&self, uuid: &str, kind: Option<RecordKind>) -> Result<Option<Record>, SourceError> {
        let query = TaskQuery {
            kind,
            ..TaskQuery::default()
        };
        Ok(self.query_tasks(&query, Some(uuid))?.into_iter().next())
    }

    fn area(&self, uuid: &str) -> Result<Option<Record>, SourceError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT uuid, title FROM TMArea WHERE uuid = ?1",
                params![uuid],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(uuid, title)| self.area_record(uuid, title))
            .transpose()
    }

    fn tasks(&self, query: &TaskQuery) -> Result<Vec<Record>, SourceError> {
        self.query_tasks(query, None)
    }

    fn areas(&self) -> Result<Vec<Record>, SourceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, title FROM TMArea ORDER BY \"index\"")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<(String, String)>, _>>()?;

        rows.into_iter()
            .map(|(uuid, title)| self.area_record(uuid, title))
            .collect()
    }
}

/// Raw TMTask columns before date decoding
struct TaskRow {
    uuid: String,
    type_code: i64,
    title: Option<String>,
    notes: Option<String>,
    start: Option<i64>,
    start_date: Value,
    deadline: Value,
    index: Option<i64>,
    area: Option<String>,
    area_title: Option<String>,
    project: Option<String>,
    heading: Option<String>,
}

fn read_task_row(row: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        uuid: row.get(0)?,
        type_code: row.get(1)?,
        title: row.get(2)?,
        notes: row.get(3)?,
        start: row.get(4)?,
        start_date: row.get(5)?,
        deadline: row.get(6)?,
        index: row.get(7)?,
        area: row.get(8)?,
        area_title: row.get(9)?,
        project: row.get(10)?,
        heading: row.get(11)?,
    })
}

impl TaskRow {
    fn into_record(self) -> Result<Record, SourceError> {
        Ok(Record {
            uuid: self.uuid,
            kind: kind_from_code(self.type_code),
            title: self.title.unwrap_or_default(),
            index: self.index,
            notes: self.notes.filter(|n| !n.is_empty()),
            start: self.start.and_then(start_label).map(str::to_string),
            start_date: decode_date(&self.start_date)?,
            deadline: decode_date(&self.deadline)?,
            area: self.area,
            area_title: self.area_title,
            project: self.project,
            heading: self.heading,
            ..Record::default()
        })
    }
}

fn push_membership(sql: &mut String, args: &mut Vec<String>, column: &str, filter: &Membership) {
    match filter {
        Membership::Any => {}
        Membership::Without => sql.push_str(&format!(" AND ({column} IS NULL OR {column} = '')")),
        Membership::Within(uuid) => {
            sql.push_str(&format!(" AND {column} = ?"));
            args.push(uuid.clone());
        }
    }
}

fn type_code(kind: RecordKind) -> Option<i64> {
    match kind {
        RecordKind::ToDo => Some(0),
        RecordKind::Project => Some(1),
        RecordKind::Heading => Some(2),
        RecordKind::Area => None,
    }
}

fn kind_from_code(code: i64) -> Option<RecordKind> {
    match code {
        0 => Some(RecordKind::ToDo),
        1 => Some(RecordKind::Project),
        2 => Some(RecordKind::Heading),
        _ => None,
    }
}

fn start_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("Inbox"),
        1 => Some("Anytime"),
        2 => Some("Someday"),
        _ => None,
    }
}

/// Decodes a TMTask date column to `YYYY-MM-DD`
///
/// Current Things versions pack dates as `year<<16 | month<<12 | day<<7`;
/// older databases stored a unix timestamp as REAL. ISO `YYYY-MM-DD` text is
/// accepted as-is; anything else is an error rather than a dropped date.
fn decode_date(value: &Value) -> Result<Option<String>, SourceError> {
    let date = match value {
        Value::Null => return Ok(None),
        Value::Integer(0) => return Ok(None),
        Value::Integer(packed) => unpack_date(*packed)?,
        Value::Real(seconds) => DateTime::<Utc>::from_timestamp(*seconds as i64, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| SourceError::InvalidDate(seconds.to_string()))?,
        Value::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| SourceError::InvalidDate(text.clone()))?,
        Value::Blob(bytes) => {
            return Err(SourceError::InvalidDate(format!("<{} byte blob>", bytes.len())))
        }
    };
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}

fn unpack_date(packed: i64) -> Result<NaiveDate, SourceError> {
    let year = (packed >> 16) as i32;
    let month = ((packed >> 12) & 0xF) as u32;
    let day = ((packed >> 7) & 0x1F) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SourceError::InvalidDate(packed.to_string()))
}
