use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio_core::{BlogDraft, CategoryDraft, MagazineDraft};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Read magazine issues and manage blog content")]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, env = "FOLIO_API_URL", default_value = "http://localhost:4000", global = true)]
    pub api_url: String,

    /// Directory holding the admin session file.
    #[arg(long, env = "FOLIO_STATE_DIR", default_value = ".folio", global = true)]
    pub state_dir: PathBuf,

    /// error, warn, info, debug or trace.
    #[arg(long, env = "FOLIO_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a magazine issue in the interactive reader.
    Read(ReadArgs),
    /// List magazine issues page by page.
    Magazines {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show the most recent magazine issues.
    MagazinesLatest,
    Blogs {
        #[command(subcommand)]
        command: BlogsCommand,
    },
    Categories,
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    pub slug: String,

    /// Minimum horizontal travel in pixels for `swipe` to turn a page.
    #[arg(long, env = "FOLIO_SWIPE_THRESHOLD", default_value_t = 50.0)]
    pub swipe_threshold: f32,

    /// Page turn animation length.
    #[arg(long, default_value_t = 600)]
    pub flip_ms: u64,

    /// Initial viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Initial viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

#[derive(Debug, Subcommand)]
pub enum BlogsCommand {
    Latest,
    Older {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Search {
        /// Free text query.
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show {
        slug: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Verify,
    Logout,
    CreateBlog(BlogArgs),
    UpdateBlog {
        id: String,
        #[command(flatten)]
        blog: BlogArgs,
    },
    DeleteBlog {
        id: String,
    },
    UploadImage {
        path: PathBuf,
    },
    CreateCategory {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        color: String,
    },
    CreateMagazine {
        #[command(flatten)]
        magazine: MagazineArgs,
        /// PDF of the issue, uploaded after the magazine is created.
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct BlogArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "", conflicts_with = "content_file")]
    pub content: String,
    /// Read the body from a file instead of `--content`.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(long, default_value = "")]
    pub excerpt: String,
    /// Comma separated.
    #[arg(long, default_value = "")]
    pub tags: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub featured_image: String,
    #[arg(long, default_value = "")]
    pub status: String,
    #[arg(long, default_value = "")]
    pub content_type: String,
    #[arg(long, default_value = "")]
    pub author: String,
    #[arg(long, default_value = "")]
    pub likes: String,
    #[arg(long, default_value = "")]
    pub saves: String,
}

impl BlogArgs {
    pub fn into_draft(self, content: String) -> BlogDraft {
        BlogDraft {
            title: self.title,
            content,
            excerpt: self.excerpt,
            tags: self.tags,
            category: self.category,
            featured_image: self.featured_image,
            status: self.status,
            content_type: self.content_type,
            author: self.author,
            likes_count: self.likes,
            saves_count: self.saves,
        }
    }
}

#[derive(Debug, Args)]
pub struct MagazineArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    /// Defaults to one derived from the title.
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long, default_value = "")]
    pub date: String,
    #[arg(long, default_value = "")]
    pub author: String,
    #[arg(long, default_value = "")]
    pub publisher: String,
    #[arg(long, default_value = "")]
    pub summary: String,
    /// Comma separated.
    #[arg(long, default_value = "")]
    pub keywords: String,
}

impl From<MagazineArgs> for MagazineDraft {
    fn from(args: MagazineArgs) -> Self {
        let slug = args
            .slug
            .unwrap_or_else(|| folio_core::suggest_slug(&args.title));
        MagazineDraft {
            title: args.title,
            slug,
            date_of_publish: args.date,
            author: args.author,
            publisher: args.publisher,
            cover_summary: args.summary,
            keywords: args.keywords,
        }
    }
}

pub fn category_draft(name: String, description: String, color: String) -> CategoryDraft {
    CategoryDraft {
        name,
        description,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn magazine_slug_defaults_from_title() {
        let cli = Cli::try_parse_from([
            "folio",
            "admin",
            "create-magazine",
            "--title",
            "Summer Issue 2025!",
        ])
        .unwrap();
        let Command::Admin {
            command: AdminCommand::CreateMagazine { magazine, pdf },
        } = cli.command
        else {
            panic!("expected create-magazine");
        };
        assert!(pdf.is_none());
        assert_eq!(MagazineDraft::from(magazine).slug, "summer-issue-2025");
    }

    #[test]
    fn reader_defaults() {
        let cli = Cli::try_parse_from(["folio", "read", "summer-2025"]).unwrap();
        let Command::Read(args) = cli.command else {
            panic!("expected read");
        };
        assert_eq!(args.slug, "summer-2025");
        assert_eq!(args.flip_ms, 600);
    }
}
