//! Photospective CLI: upload photos, browse them and filter by EXIF tags.
//!
//! Configuration comes from the environment (`DATABASE_URL`, `MEDIA_ROOT`, ...; a `.env`
//! file is read first). Results are printed as JSON on stdout.

use clap::{Parser, Subcommand};
use photospective_cli::{init_tracing, print_json, report_error, upload_filename};
use photospective_core::{AppError, Config};
use photospective_db::{PgGalleryStore, UserRepository};
use photospective_services::GalleryService;
use photospective_storage::{LocalMediaStorage, MediaStorage};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "photospective", about = "Photo gallery with EXIF tag filtering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Manage image owners
    User {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Upload a photo and tag it from its EXIF data
    Upload {
        /// Owner of the photo
        #[arg(long)]
        user: i64,
        /// Path to the image file
        file: PathBuf,
    },
    /// List a user's photos, newest first
    List {
        #[arg(long)]
        user: i64,
    },
    /// Show one photo with its tags
    Show {
        #[arg(long)]
        user: i64,
        image_id: i64,
    },
    /// Photos carrying every given tag id (invalid ids are ignored)
    Filter {
        #[arg(long)]
        user: i64,
        /// Tag id; repeat for several tags
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },
    /// Categories present on a user's photos
    Categories {
        #[arg(long)]
        user: i64,
    },
    /// Tags of one category on a user's photos
    Tags {
        #[arg(long)]
        user: i64,
        category_id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user
    Add { username: String },
    /// Delete a user with all their photos
    Delete { id: i64 },
    /// List users
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_error(&err)),
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;

    if let Commands::Migrate = cli.command {
        let pool = photospective_db::setup_database(&config).await?;
        pool.close().await;
        print_json(&serde_json::json!({ "success": true, "message": "Migrations applied" }))?;
        return Ok(());
    }

    let pool = photospective_db::connect(&config).await?;
    let store = PgGalleryStore::new(pool.clone());
    let users = UserRepository::new(pool.clone());
    let media = Arc::new(LocalMediaStorage::new(config.media_root.clone()).await?);
    let gallery = GalleryService::from_config(&config, Arc::new(store), media.clone());

    let result = execute(cli.command, &gallery, &users, media.as_ref()).await;
    pool.close().await;
    result
}

async fn execute(
    command: Commands,
    gallery: &GalleryService,
    users: &UserRepository,
    media: &LocalMediaStorage,
) -> Result<(), AppError> {
    match command {
        Commands::Migrate => {}
        Commands::User { sub } => match sub {
            UserCommands::Add { username } => {
                let user = users.create_user(&username).await?;
                print_json(&user)?;
            }
            UserCommands::Delete { id } => {
                let images = gallery.list_images(id).await?;
                if !users.delete_user(id).await? {
                    return Err(AppError::NotFound(format!("User {} not found", id)));
                }
                // Rows are gone through the cascade; files are removed separately
                for image in &images {
                    if let Err(e) = media.delete(&image.path).await {
                        tracing::warn!(error = %e, key = %image.path, "Failed to remove photo file");
                    }
                }
                print_json(&serde_json::json!({
                    "success": true,
                    "message": format!("User {} deleted", id),
                    "images_removed": images.len(),
                }))?;
            }
            UserCommands::List => {
                print_json(&users.list_users().await?)?;
            }
        },
        Commands::Upload { user, file } => {
            let filename = upload_filename(&file)?;
            let data = tokio::fs::read(&file).await.map_err(|e| {
                AppError::InvalidInput(format!("Cannot read {}: {}", file.display(), e))
            })?;
            let profile = gallery.upload(user, &filename, &data).await?;
            print_json(&profile)?;
        }
        Commands::List { user } => {
            print_json(&gallery.list_images(user).await?)?;
        }
        Commands::Show { user, image_id } => {
            let profile = gallery
                .image_profile(user, image_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Image {} not found", image_id)))?;
            print_json(&profile)?;
        }
        Commands::Filter { user, tags } => {
            print_json(&gallery.filter_by_tags(user, &tags).await?)?;
        }
        Commands::Categories { user } => {
            print_json(&gallery.personal_categories(user).await?)?;
        }
        Commands::Tags { user, category_id } => {
            print_json(&gallery.tags_of_category(user, category_id).await?)?;
        }
    }

    Ok(())
}
