//! Initial data.
//!
//! Seeding can be run repeatedly. Existing accounts, advice topics and
//! links are left alone, and countries are only loaded into an empty
//! table since their names are not unique.

use std::path::Path;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::config::SeedConfig;
use crate::database::entity::user::Role;
use crate::database::{
    AdviceDatabase, CountryAdviceDatabase, CountryDatabase, NewAdvice, NewCountry, NewUser,
    UserDatabase,
};
use crate::error::{ServerError, ServerResult};
use advisory::seed::{read_records, AdviceRecord, CountryRecord, LinkRecord};

/// Seed files to load.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedFiles<'a> {
    pub advice: Option<&'a Path>,
    pub countries: Option<&'a Path>,
    pub links: Option<&'a Path>,
}

/// The number of records created by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub advice: usize,
    pub countries: usize,
    pub links: usize,
}

impl<'a> SeedFiles<'a> {
    pub fn from_config(config: &'a SeedConfig) -> Self {
        Self {
            advice: config.advice.as_deref(),
            countries: config.countries.as_deref(),
            links: config.links.as_deref(),
        }
    }
}

/// Seeds the admin account and the configured seed files.
pub async fn seed_database(database: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    if let Some(password) = &config.admin_password {
        ensure_admin(database, &config.admin_username, password).await?;
    } else {
        tracing::warn!("No admin password configured, skipping admin account");
    }

    load_files(database, SeedFiles::from_config(config)).await?;

    Ok(())
}

/// Creates an admin account unless the username is taken.
///
/// Returns whether the account was created.
pub async fn ensure_admin(
    database: &DatabaseConnection,
    username: &str,
    password: &str,
) -> ServerResult<bool> {
    if let Some(user) = database.get_user_by_name(username).await? {
        if user.role != Role::Admin {
            tracing::warn!("Seed admin {} exists but is not an admin", username);
        }
        return Ok(false);
    }

    let user = NewUser::new(username.to_owned(), password, Role::Admin).await?;
    database.add_user(user).await?;

    Ok(true)
}

/// Loads seed files in dependency order.
pub async fn load_files(database: &DatabaseConnection, files: SeedFiles<'_>) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    if let Some(path) = files.advice {
        let records = read_records::<AdviceRecord>(path)?;
        summary.advice = load_advice(database, records).await?;
    }

    if let Some(path) = files.countries {
        let records = read_records::<CountryRecord>(path)?;
        summary.countries = load_countries(database, records).await?;
    }

    if let Some(path) = files.links {
        let records = read_records::<LinkRecord>(path)?;
        summary.links = load_links(database, records).await?;
    }

    tracing::info!(
        "Seeded {} advice, {} countries and {} links",
        summary.advice,
        summary.countries,
        summary.links
    );

    Ok(summary)
}

pub async fn load_advice(
    database: &DatabaseConnection,
    records: Vec<AdviceRecord>,
) -> ServerResult<usize> {
    let mut created = 0;

    for record in records {
        let advice = NewAdvice {
            link: record.link().map(str::to_owned),
            topic: record.topic,
            description: record.description,
        };

        match database.add_advice(advice).await {
            Ok(_) => created += 1,
            Err(ServerError::AdviceAlreadyExists { topic }) => {
                tracing::debug!("Skipping existing advice on {}", topic);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}

/// Loads countries into an empty table.
///
/// Names are lowercased to match searches.
pub async fn load_countries(
    database: &DatabaseConnection,
    records: Vec<CountryRecord>,
) -> ServerResult<usize> {
    if !database.get_all_countries().await?.is_empty() {
        tracing::info!("Countries already loaded, skipping");
        return Ok(0);
    }

    let mut created = 0;

    for record in records {
        let country = NewCountry {
            indices: record.indices(),
            name: record.name.trim().to_lowercase(),
            description: record.description,
            travel_advice: record.travel_advice,
        };

        database.add_country(country).await?;
        created += 1;
    }

    Ok(created)
}

pub async fn load_links(
    database: &DatabaseConnection,
    records: Vec<LinkRecord>,
) -> ServerResult<usize> {
    let mut created = 0;

    for record in records {
        let country = database
            .get_country_by_name(&record.country.to_lowercase())
            .await?;
        let advice = database.get_advice_by_topic(&record.topic).await?;

        let (country, advice) = match (country, advice) {
            (Some(country), Some(advice)) => (country, advice),
            _ => {
                tracing::warn!(
                    "Skipping link between unknown country {:?} and topic {:?}",
                    record.country,
                    record.topic
                );
                continue;
            }
        };

        match database.add_country_advice(&country, &advice).await {
            Ok(()) => created += 1,
            Err(ServerError::CountryAdviceAlreadyExists) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::database::test_database;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_seed_files() {
        let db = test_database().await;

        let advice = csv_file(
            "topic,description,link
crime,Keep valuables out of sight.,https://example.com/crime
health,Check vaccinations before travel.,
",
        );
        let countries = csv_file(
            "name,description,travel_advice,crime_index,disaster_risk,corruption_index,health
Testland,A test country,Exercise caution,0.5,0.5,0.5,0.5
",
        );
        let links = csv_file(
            "country,topic
Testland,crime
Testland,health
Nowhere,crime
Testland,unknown
",
        );

        let files = SeedFiles {
            advice: Some(advice.path()),
            countries: Some(countries.path()),
            links: Some(links.path()),
        };

        let summary = load_files(&db, files).await.unwrap();
        assert_eq!(
            SeedSummary {
                advice: 2,
                countries: 1,
                links: 2,
            },
            summary
        );

        let country = db.get_country_by_name("testland").await.unwrap().unwrap();
        assert_eq!(0.5, country.indices().aggregate());

        let topics: Vec<String> = db
            .get_advice(&country)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.topic)
            .collect();
        assert_eq!(vec!["crime", "health"], topics);

        // Repeated runs create nothing
        let summary = load_files(&db, files).await.unwrap();
        assert_eq!(SeedSummary::default(), summary);
        assert_eq!(1, db.get_all_countries().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_ensure_admin() {
        let db = test_database().await;

        assert!(ensure_admin(&db, "admin", "Adm1n!pass").await.unwrap());
        assert!(!ensure_admin(&db, "admin", "Other1!pass").await.unwrap());

        let admin = db.get_user_by_name("admin").await.unwrap().unwrap();
        assert_eq!(Role::Admin, admin.role);
        assert!(db.validate_user("admin", "Adm1n!pass").await.unwrap());
    }

    #[tokio::test]
    async fn test_seed_database_without_password() {
        let db = test_database().await;

        seed_database(&db, &SeedConfig::default()).await.unwrap();
        assert!(db.get_user_by_name("admin").await.unwrap().is_none());
    }
}
