use crate::error::ApiError;
use crate::models::phrase::Phrase;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{error, info};

/// 起動時に一度だけ投入するブートストラップ用のフレーズ一覧。
/// (japanese, romaji, english, hiragana, category) の 5 要素タプルで保持する。
const SEED_PHRASES: &[(&str, &str, &str, &str, &str)] = &[
    // 課程1：日常のあいさつ
    ("こんにちは", "Konnichiwa", "Hello", "こんにちは", "greeting"),
    ("おはようございます", "Ohayō gozaimasu", "Good morning", "おはようございます", "greeting"),
    ("こんばんは", "Konbanwa", "Good evening", "こんばんは", "greeting"),
    ("お元気ですか？", "Ogenki desu ka?", "How are you?", "おげんきですか", "greeting"),
    ("はい、元気です", "Hai, genki desu", "I'm fine", "はい、げんきです", "greeting"),
    // 課程2：自己紹介
    ("はじめまして", "Hajimemashite", "Nice to meet you", "はじめまして", "introduction"),
    ("私は学生です", "Watashi wa gakusei desu", "I am a student", "わたしはがくせいです", "introduction"),
    ("名前は何ですか？", "Namae wa nan desu ka?", "What is your name?", "なまえはなんですか", "introduction"),
    ("よろしくお願いします", "Yoroshiku onegaishimasu", "Please treat me well", "よろしくおねがいします", "introduction"),
    // 課程3：感謝と謝罪
    ("ありがとうございます", "Arigatō gozaimasu", "Thank you very much", "ありがとうございます", "thanks"),
    ("すみません", "Sumimasen", "Excuse me / Sorry", "すみません", "thanks"),
    ("ごめんなさい", "Gomen nasai", "I'm sorry", "ごめんなさい", "thanks"),
    ("どういたしまして", "Dōitashimashite", "You're welcome", "どういたしまして", "thanks"),
];

/// SQLite への接続プールを握るリポジトリ層。
/// sqlx の `SqlitePool` を内部に保持し、フレーズ関連の操作をメソッドとして提供する。
/// 各クエリはプールから接続を借り、Future の完了時に必ず返却する。
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// DB ファイルを開き（無ければ作成し）、プールを構築して疎通確認まで実施する。
    /// `async fn` なので `Database::new(path).await` のように `await` が必要。
    pub async fn new(database_path: &str) -> Result<Self, ApiError> {
        info!("Opening SQLite database at: {}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to open SQLite database: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })?;

        let db = Database { pool };
        db.test_connection().await?;

        Ok(db)
    }

    /// テスト用のインメモリ DB。接続ごとに別のメモリ空間になるため、
    /// プールを 1 接続に固定している。
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self, ApiError> {
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ApiError::Database(format!("In-memory options failed: {}", e)))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| ApiError::Database(format!("In-memory pool creation failed: {}", e)))?;

        Ok(Database { pool })
    }

    /// `SELECT 1` を投げて DB が生きているか確認する。
    /// 運用時の監視スクリプトなど、ライブラリ利用者向けに公開している。
    pub async fn health_check(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                ApiError::Database(format!("Health check failed: {}", e))
            })?;

        Ok(())
    }

    /// アプリ起動時にテーブルを CREATE する簡易マイグレーター。
    /// リスナーを bind する前に main から明示的に一度だけ呼び出す。
    pub async fn migrate(&self) -> Result<(), ApiError> {
        info!("Running database migrations");

        let phrases_table = r#"
            CREATE TABLE IF NOT EXISTS phrases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                japanese TEXT NOT NULL,
                romaji TEXT NOT NULL,
                english TEXT NOT NULL,
                hiragana TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'basic'
            )
        "#;

        sqlx::query(phrases_table)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to create phrases table: {}", e);
                ApiError::Database(format!("Phrases table creation failed: {}", e))
            })?;

        let category_index =
            "CREATE INDEX IF NOT EXISTS idx_phrases_category ON phrases(category)";

        sqlx::query(category_index)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to create phrases category index: {}", e);
                ApiError::Database(format!("Category index creation failed: {}", e))
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// `Database::new` 直後にプールが機能するかの確認に使う。
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database connection test failed: {}", e);
                ApiError::Database(format!("Connection test failed: {}", e))
            })?;

        info!("Database connection test successful");
        Ok(())
    }

    // Phrase repository operations

    /// テーブルの総行数を返す。シーディングとテストで使用する。
    pub async fn count_phrases(&self) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM phrases")
            .fetch_one(&self.pool)
            .await
            .map_err(ApiError::from)?;

        Ok(count)
    }

    /// ブートストラップ用のフレーズを投入する。
    /// 既にレコードが存在する場合は何もしないことで、重複挿入を避けている。
    pub async fn seed_phrases(&self) -> Result<(), ApiError> {
        info!("Seeding phrase data");

        let count = self.count_phrases().await?;
        if count > 0 {
            info!("Phrases table already contains {} rows, skipping seed", count);
            return Ok(());
        }

        let insert_query = r#"
            INSERT INTO phrases (japanese, romaji, english, hiragana, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
        "#;

        for &(japanese, romaji, english, hiragana, category) in SEED_PHRASES {
            sqlx::query(insert_query)
                .bind(japanese)
                .bind(romaji)
                .bind(english)
                .bind(hiragana)
                .bind(category)
                .execute(&self.pool)
                .await
                .map_err(ApiError::from)?;
        }

        info!("Successfully seeded {} phrases", SEED_PHRASES.len());
        Ok(())
    }

    /// カテゴリの完全一致でフレーズを列挙する。
    /// 一致する行が無い場合はエラーではなく空の Vec を返す。
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Phrase>, ApiError> {
        let phrases = sqlx::query_as::<_, Phrase>(
            "SELECT id, japanese, romaji, english, hiragana, category FROM phrases WHERE category = ?1",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::from)?;

        Ok(phrases)
    }

    /// `ORDER BY RANDOM()` で対象カテゴリから 1 件だけランダム取得する。
    /// カテゴリが空のときは `None` を返し、エンドポイント側でエラーペイロードに変換する。
    pub async fn pick_random(&self, category: &str) -> Result<Option<Phrase>, ApiError> {
        let phrase = sqlx::query_as::<_, Phrase>(
            "SELECT id, japanese, romaji, english, hiragana, category FROM phrases WHERE category = ?1 ORDER BY RANDOM() LIMIT 1",
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::from)?;

        Ok(phrase)
    }

    /// 格納済みカテゴリの DISTINCT 一覧。
    /// `/categories` ハンドラはこの結果を参照せず固定マップを返す（元実装の挙動を踏襲）。
    pub async fn distinct_categories(&self) -> Result<Vec<String>, ApiError> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM phrases")
                .fetch_all(&self.pool)
                .await
                .map_err(ApiError::from)?;

        Ok(categories)
    }

    /// カテゴリ未指定（列デフォルトの 'basic'）で 1 行挿入する。テスト専用。
    #[cfg(test)]
    pub(crate) async fn insert_phrase_for_test(
        &self,
        japanese: &str,
        romaji: &str,
        english: &str,
        hiragana: &str,
        category: &str,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO phrases (japanese, romaji, english, hiragana, category) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(japanese)
        .bind(romaji)
        .bind(english)
        .bind(hiragana)
        .bind(category)
        .execute(&self.pool)
        .await
        .map_err(ApiError::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn seeded_db() -> Database {
        let db = Database::in_memory().await.expect("in-memory database");
        db.migrate().await.expect("migrations");
        db.seed_phrases().await.expect("seeding");
        db
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = seeded_db().await;
        assert_eq!(db.count_phrases().await.unwrap(), 13);

        // Second call must be a no-op
        db.seed_phrases().await.expect("second seeding");
        assert_eq!(db.count_phrases().await.unwrap(), 13);
    }

    #[tokio::test]
    async fn test_list_by_category_counts() {
        let db = seeded_db().await;

        assert_eq!(db.list_by_category("greeting").await.unwrap().len(), 5);
        assert_eq!(db.list_by_category("introduction").await.unwrap().len(), 4);
        assert_eq!(db.list_by_category("thanks").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_by_category_unknown_is_empty() {
        let db = seeded_db().await;

        let phrases = db.list_by_category("nonexistent").await.unwrap();
        assert!(phrases.is_empty());
    }

    #[tokio::test]
    async fn test_seeded_rows_have_all_fields_populated() {
        let db = seeded_db().await;

        for category in ["greeting", "introduction", "thanks"] {
            for phrase in db.list_by_category(category).await.unwrap() {
                assert!(!phrase.japanese.is_empty());
                assert!(!phrase.romaji.is_empty());
                assert!(!phrase.english.is_empty());
                assert!(!phrase.hiragana.is_empty());
                assert_eq!(phrase.category, category);
            }
        }
    }

    #[tokio::test]
    async fn test_pick_random_matches_category_and_covers_all_rows() {
        let db = seeded_db().await;

        let greeting_ids: HashSet<i64> = db
            .list_by_category("greeting")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(greeting_ids.len(), 5);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let phrase = db
                .pick_random("greeting")
                .await
                .unwrap()
                .expect("greeting category is seeded");
            assert_eq!(phrase.category, "greeting");
            seen.insert(phrase.id);
        }

        // 200 draws over 5 rows: every row shows up unless selection is biased
        assert_eq!(seen, greeting_ids);
    }

    #[tokio::test]
    async fn test_pick_random_empty_category_is_none() {
        let db = seeded_db().await;

        assert!(db.pick_random("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_distinct_categories_reflects_stored_rows() {
        let db = seeded_db().await;

        let categories: HashSet<String> =
            db.distinct_categories().await.unwrap().into_iter().collect();
        let expected: HashSet<String> = ["greeting", "introduction", "thanks"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(categories, expected);

        db.insert_phrase_for_test("さようなら", "Sayōnara", "Goodbye", "さようなら", "farewell")
            .await
            .unwrap();

        assert_eq!(db.distinct_categories().await.unwrap().len(), 4);
    }
}
