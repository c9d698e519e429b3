//! In-memory MediaWiki fixture shared by the tests in this crate.

use crate::Database;

/// The subset of the MediaWiki (< 1.31) schema the exporter reads.
pub(crate) struct Fixture {
    pub(crate) db: Database,
    prefix: String,
}
impl Fixture {
    pub(crate) async fn new(prefix: &str) -> Self {
        let db = Database::connect_in_memory().await.unwrap();
        let fixture = Self { db, prefix: prefix.to_string() };
        fixture
            .execute(
                "CREATE TABLE {prefix}page (
                    page_id INTEGER PRIMARY KEY,
                    page_namespace INTEGER NOT NULL,
                    page_title TEXT NOT NULL,
                    page_latest INTEGER
                )",
            )
            .await;
        fixture
            .execute("CREATE TABLE {prefix}revision (rev_id INTEGER PRIMARY KEY, rev_text_id INTEGER)")
            .await;
        fixture.execute("CREATE TABLE {prefix}text (old_id INTEGER PRIMARY KEY, old_text TEXT)").await;
        fixture
    }

    async fn execute(&self, sql: &str) {
        sqlx::query(&sql.replace("{prefix}", &self.prefix)).execute(self.db.pool()).await.unwrap();
    }

    pub(crate) async fn page(&self, id: i64, namespace: i64, title: &str, latest: i64) {
        let sql = format!(
            "INSERT INTO {}page (page_id, page_namespace, page_title, page_latest) VALUES (?, ?, ?, ?)",
            self.prefix
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(namespace)
            .bind(title)
            .bind(latest)
            .execute(self.db.pool())
            .await
            .unwrap();
    }

    pub(crate) async fn page_without_revision(&self, id: i64, namespace: i64, title: &str) {
        let sql = format!(
            "INSERT INTO {}page (page_id, page_namespace, page_title, page_latest) VALUES (?, ?, ?, NULL)",
            self.prefix
        );
        sqlx::query(&sql).bind(id).bind(namespace).bind(title).execute(self.db.pool()).await.unwrap();
    }

    pub(crate) async fn revision(&self, id: i64, text_id: Option<i64>) {
        let sql = format!("INSERT INTO {}revision (rev_id, rev_text_id) VALUES (?, ?)", self.prefix);
        sqlx::query(&sql).bind(id).bind(text_id).execute(self.db.pool()).await.unwrap();
    }

    pub(crate) async fn text(&self, id: i64, text: Option<&str>) {
        let sql = format!("INSERT INTO {}text (old_id, old_text) VALUES (?, ?)", self.prefix);
        sqlx::query(&sql).bind(id).bind(text).execute(self.db.pool()).await.unwrap();
    }
}
