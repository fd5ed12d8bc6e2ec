use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection};

use crate::error::HuntResult;
use crate::leaderboard::{Leaderboard, ScoreEntry, CAPACITY};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS high_scores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        display_name TEXT NOT NULL,
        total_seconds INTEGER NOT NULL,
        minutes_part TEXT NOT NULL,
        seconds_part TEXT NOT NULL,
        submitted_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_high_scores_time ON high_scores(total_seconds, id);
"#;

/// Durable leaderboard. Applies the same ranking rule as
/// [`Leaderboard::merge`] and keeps only the top [`CAPACITY`] rows.
#[derive(Debug)]
pub struct ScoreDb {
    conn: Connection,
}

impl ScoreDb {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> HuntResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> HuntResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> HuntResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(ScoreDb { conn })
    }

    pub fn top_scores(&self) -> HuntResult<Leaderboard> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT display_name, total_seconds, minutes_part, seconds_part
            FROM high_scores
            ORDER BY total_seconds ASC, id ASC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map([CAPACITY as i64], |row| {
            Ok(ScoreEntry {
                display_name: row.get(0)?,
                total_seconds: row.get::<_, i64>(1)? as u64,
                minutes_part: row.get(2)?,
                seconds_part: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(Leaderboard::from(entries))
    }

    /// Record `entry` if it makes the board. Returns whether it qualified.
    pub fn submit(&mut self, entry: &ScoreEntry) -> HuntResult<bool> {
        let current = self.top_scores()?;
        if !current.qualifies(entry.total_seconds) {
            tracing::info!(total_seconds = entry.total_seconds, "score did not qualify");
            return Ok(false);
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO high_scores
            (display_name, total_seconds, minutes_part, seconds_part, submitted_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.display_name,
                entry.total_seconds as i64,
                entry.minutes_part,
                entry.seconds_part,
                Local::now().to_rfc3339(),
            ],
        )?;
        let pruned = tx.execute(
            r#"
            DELETE FROM high_scores WHERE id NOT IN (
                SELECT id FROM high_scores
                ORDER BY total_seconds ASC, id ASC
                LIMIT ?1
            )
            "#,
            [CAPACITY as i64],
        )?;
        tx.commit()?;

        tracing::info!(
            name = %entry.display_name,
            total_seconds = entry.total_seconds,
            pruned,
            "score recorded"
        );
        Ok(true)
    }

    pub fn clear(&self) -> HuntResult<()> {
        self.conn.execute("DELETE FROM high_scores", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, secs: u64) -> ScoreEntry {
        ScoreEntry {
            display_name: name.to_string(),
            total_seconds: secs,
            minutes_part: format!("{:02}", secs / 60),
            seconds_part: format!("{:02}", secs % 60),
        }
    }

    fn times(db: &ScoreDb) -> Vec<u64> {
        db.top_scores()
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.total_seconds)
            .collect()
    }

    #[test]
    fn empty_database_has_empty_board() {
        let db = ScoreDb::open_in_memory().unwrap();
        assert!(db.top_scores().unwrap().is_empty());
    }

    #[test]
    fn keeps_only_the_five_fastest() {
        let mut db = ScoreDb::open_in_memory().unwrap();
        for t in [50, 10, 40, 20, 30] {
            assert!(db.submit(&entry("p", t)).unwrap());
        }
        assert!(db.submit(&entry("mid", 25)).unwrap());
        assert_eq!(times(&db), vec![10, 20, 25, 30, 40]);

        assert!(!db.submit(&entry("slow", 41)).unwrap());
        assert_eq!(times(&db), vec![10, 20, 25, 30, 40]);

        let rows: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM high_scores", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 5);
    }

    #[test]
    fn ties_rank_by_arrival() {
        let mut db = ScoreDb::open_in_memory().unwrap();
        db.submit(&entry("first", 30)).unwrap();
        db.submit(&entry("second", 30)).unwrap();
        let board = db.top_scores().unwrap();
        assert_eq!(board.entries()[0].display_name, "first");
        assert_eq!(board.entries()[1].display_name, "second");
    }

    #[test]
    fn tie_with_full_last_place_is_pruned() {
        let mut db = ScoreDb::open_in_memory().unwrap();
        for t in [10, 20, 30, 40, 50] {
            db.submit(&entry("p", t)).unwrap();
        }
        assert!(db.submit(&entry("tie", 50)).unwrap());
        let board = db.top_scores().unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(board.entries()[4].display_name, "p");
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.db");
        {
            let mut db = ScoreDb::open(&path).unwrap();
            db.submit(&entry("ann", 75)).unwrap();
        }
        let db = ScoreDb::open(&path).unwrap();
        let board = db.top_scores().unwrap();
        assert_eq!(board.entries()[0].display_name, "ann");
        assert_eq!(board.entries()[0].time_display(), "01 : 15");
    }

    #[test]
    fn clear_empties_the_board() {
        let mut db = ScoreDb::open_in_memory().unwrap();
        db.submit(&entry("x", 5)).unwrap();
        db.clear().unwrap();
        assert!(db.top_scores().unwrap().is_empty());
    }
}
