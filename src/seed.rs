//! Bootstrap seeding: default admin user and initial site content.
//!
//! Runs once at startup, after migrations. Every insert is guarded by an
//! existence check, so the site ends up with exactly one admin user, one
//! "about" row and three service rows no matter how many times the process
//! restarts. All staged inserts commit together at the end; a failure along
//! the way leaves the database untouched.

use crate::db::DbPool;
use crate::sql;
use crate::web::auth::AuthStore;
use anyhow::{Context, Result};
use tracing::info;

const ABOUT_TITLE: &str = "Hakkımızda";

const ABOUT_TEXT: &str = "Bodur Oto Kurtarma olarak, 2005 yılından bu yana İstanbul ve çevre illerde 7/24 çekici ve yol yardım hizmeti sunmaktayız. Profesyonel ekibimiz ve modern araç filomuzla, aracınızın türü ve durumu ne olursa olsun en hızlı ve güvenli şekilde yardımınıza koşuyoruz.\n\nUzman kadromuz, her türlü araç çekme, kurtarma ve yol yardımı konusunda deneyimli olup, en zorlu koşullarda bile çözüm üretebilmektedir. Müşteri memnuniyetini her şeyin üstünde tutan anlayışımızla, uygun fiyat ve kaliteli hizmet garantisi veriyoruz.\n\nAcil durumlar için 7/24 çağrı merkezimiz hizmetinizdedir. Tek bir telefonla İstanbul'un her noktasına en kısa sürede ulaşıyoruz.";

const SERVICES: [(&str, &str); 3] = [
    (
        "Oto Çekici Hizmeti",
        "Bodur Oto Kurtarma olarak her türlü araç için profesyonel çekici hizmeti sunuyoruz. Modern çekici filomuzla aracınızı güvenle istediğiniz yere taşıyoruz. Özel ekipmanlarımız sayesinde hasarlı ve kazalı araçları da güvenle taşıyabiliyoruz.",
    ),
    (
        "Yol Yardım",
        "Lastik patlaması, akü takviyesi, yakıt bitmesi gibi durumlarda hızlı yol yardım hizmeti veriyoruz. Deneyimli ekibimiz ve tam donanımlı araçlarımızla İstanbul'un her noktasında yanınızdayız.",
    ),
    (
        "Kaza Kurtarma",
        "Kaza durumlarında profesyonel kurtarma ekibimizle en kısa sürede olay yerinde olup, aracınızı güvenle kurtarıyoruz. Özel vinç sistemlerimiz ve ekipmanlarımızla her türlü kaza durumunda çözüm üretiyoruz.",
    ),
];

/// Seed default rows into an already-migrated database.
///
/// The admin credentials come from configuration and only apply when no user
/// with that username exists yet.
pub async fn run(pool: &DbPool, admin_username: &str, admin_password: &str) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to begin seed transaction")?;

    let existing_user = sqlx::query(sql::SELECT_USER)
        .bind(admin_username)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to check for admin user")?;

    if existing_user.is_none() {
        let password_hash = AuthStore::hash_password(admin_password)?;
        sqlx::query(sql::INSERT_USER)
            .bind(admin_username)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await
            .context("Failed to seed admin user")?;
        info!(username = %admin_username, "Seeded admin user");
    }

    let existing_about = sqlx::query(sql::SELECT_CONTENT_BY_SECTION)
        .bind("about")
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to check for about content")?;

    if existing_about.is_none() {
        sqlx::query(sql::INSERT_CONTENT)
            .bind("about")
            .bind(ABOUT_TITLE)
            .bind(ABOUT_TEXT)
            .bind(None::<String>)
            .execute(&mut *tx)
            .await
            .context("Failed to seed about content")?;
        info!("Seeded about content");
    }

    for (title, text) in SERVICES {
        let existing = sqlx::query(sql::SELECT_CONTENT_BY_SECTION_AND_TITLE)
            .bind("services")
            .bind(title)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to check for service content")?;

        if existing.is_none() {
            sqlx::query(sql::INSERT_CONTENT)
                .bind("services")
                .bind(title)
                .bind(text)
                .bind(None::<String>)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to seed service: {title}"))?;
            info!(title = %title, "Seeded service content");
        }
    }

    tx.commit().await.context("Failed to commit seed transaction")?;

    Ok(())
}
