//! One-shot listing and admin commands.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use folio_core::{format_publish_date, BlogDraft, LoginForm, MagazineDraft, ValidationErrors};
use folio_engine::{
    AdminAck, AdminClient, ApiClient, ApiError, BlogPage, BlogQuery, MagazineSummary, Session,
};
use folio_logging::folio_warn;
use tokio::runtime::Runtime;

use super::ui::constants::LOGIN_HINT;
use crate::cli::{category_draft, AdminCommand, BlogArgs, BlogsCommand};

pub fn magazines(rt: &Runtime, api: &ApiClient, page: u32, limit: u32) -> anyhow::Result<()> {
    let listing = rt
        .block_on(api.list_magazines(page, limit))
        .map_err(|err| api_failure(err, "Failed to load magazines"))?;
    for magazine in &listing.items {
        println!("{}", format_magazine(magazine));
    }
    let p = listing.pagination;
    println!(
        "Page {} of {} ({} issues)",
        p.page,
        p.total_pages.max(1),
        p.total
    );
    Ok(())
}

pub fn latest_magazines(rt: &Runtime, api: &ApiClient) -> anyhow::Result<()> {
    let magazines = rt
        .block_on(api.latest_magazines())
        .map_err(|err| api_failure(err, "Failed to load magazines"))?;
    for magazine in &magazines {
        println!("{}", format_magazine(magazine));
    }
    Ok(())
}

pub fn blogs(rt: &Runtime, api: &ApiClient, command: BlogsCommand) -> anyhow::Result<()> {
    let page = match command {
        BlogsCommand::Latest => rt.block_on(api.latest_blogs()),
        BlogsCommand::Older { page, limit } => rt.block_on(api.older_blogs(&BlogQuery {
            page,
            limit,
            ..BlogQuery::default()
        })),
        BlogsCommand::Search {
            q,
            category,
            author,
            tag,
            page,
            limit,
        } => rt.block_on(api.search_blogs(&BlogQuery {
            q,
            category,
            author,
            tag,
            page,
            limit,
        })),
        BlogsCommand::Show { slug } => {
            let post = rt
                .block_on(api.fetch_blog(&slug))
                .map_err(|err| api_failure(err, "Failed to load blog"))?;
            println!("{}", post.title);
            println!(
                "{} | {}",
                post.author.as_deref().unwrap_or("Unknown author"),
                post.created_at
                    .as_deref()
                    .map(format_publish_date)
                    .unwrap_or_default()
            );
            if !post.tags.is_empty() {
                println!("#{}", post.tags.join(" #"));
            }
            println!();
            println!("{}", post.content);
            return Ok(());
        }
    };
    let page = page.map_err(|err| api_failure(err, "Failed to load blogs"))?;
    print_blog_page(&page);
    Ok(())
}

pub fn categories(rt: &Runtime, api: &ApiClient) -> anyhow::Result<()> {
    let categories = rt
        .block_on(api.list_categories())
        .map_err(|err| api_failure(err, "Failed to load categories"))?;
    for category in &categories {
        match &category.description {
            Some(description) => println!("{} - {}", category.name, description),
            None => println!("{}", category.name),
        }
    }
    Ok(())
}

pub fn admin(
    rt: &Runtime,
    api: &ApiClient,
    session: &mut Session,
    command: AdminCommand,
) -> anyhow::Result<()> {
    match command {
        AdminCommand::Login { email, password } => {
            let credentials = validated(LoginForm { email, password }.validate())?;
            let token = rt
                .block_on(api.login(&credentials))
                .map_err(|err| api_failure(err, "Login failed"))?;
            session
                .establish(token)
                .map_err(|err| anyhow!("Logged in but the session could not be saved: {err}"))?;
            println!("Logged in as {}", credentials.email);
        }
        AdminCommand::Verify => {
            rt.block_on(AdminClient::new(api, session).verify())
                .map_err(|err| api_failure(err, "Verification failed"))?;
            println!("Session is valid");
        }
        AdminCommand::Logout => {
            session.teardown();
            println!("Logged out");
        }
        AdminCommand::CreateBlog(blog) => {
            let payload = validated(blog_draft(blog)?.validate())?;
            let ack = rt
                .block_on(AdminClient::new(api, session).create_blog(&payload))
                .map_err(|err| api_failure(err, "Failed to create blog"))?;
            print_ack(&ack, "Blog created");
        }
        AdminCommand::UpdateBlog { id, blog } => {
            let payload = validated(blog_draft(blog)?.validate())?;
            let ack = rt
                .block_on(AdminClient::new(api, session).update_blog(&id, &payload))
                .map_err(|err| api_failure(err, "Failed to update blog"))?;
            print_ack(&ack, "Blog updated");
        }
        AdminCommand::DeleteBlog { id } => {
            let ack = rt
                .block_on(AdminClient::new(api, session).delete_blog(&id))
                .map_err(|err| api_failure(err, "Failed to delete blog"))?;
            print_ack(&ack, "Blog deleted");
        }
        AdminCommand::UploadImage { path } => {
            let (file_name, data) = read_upload(&path)?;
            let url = rt
                .block_on(AdminClient::new(api, session).upload_image(&file_name, data))
                .map_err(|err| api_failure(err, "Failed to upload image"))?;
            println!("{url}");
        }
        AdminCommand::CreateCategory {
            name,
            description,
            color,
        } => {
            let payload = validated(category_draft(name, description, color).validate())?;
            let ack = rt
                .block_on(AdminClient::new(api, session).create_category(&payload))
                .map_err(|err| api_failure(err, "Failed to create category"))?;
            print_ack(&ack, "Category created");
        }
        AdminCommand::CreateMagazine { magazine, pdf } => {
            let payload = validated(MagazineDraft::from(magazine).validate())?;
            let pdf = pdf.as_deref().map(read_upload).transpose()?;
            let ack = rt
                .block_on(AdminClient::new(api, session).create_magazine(&payload))
                .map_err(|err| api_failure(err, "Failed to create magazine"))?;
            print_ack(&ack, "Magazine created");
            if let Some((file_name, data)) = pdf {
                let ack = rt
                    .block_on(AdminClient::new(api, session).upload_magazine_pdf(
                        &payload.slug,
                        &file_name,
                        data,
                    ))
                    .map_err(|err| api_failure(err, "Failed to upload PDF"))?;
                print_ack(&ack, "PDF uploaded");
            }
        }
    }
    Ok(())
}

fn blog_draft(mut blog: BlogArgs) -> anyhow::Result<BlogDraft> {
    let content = match blog.content_file.take() {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("reading blog content from {}", path.display()))?,
        None => std::mem::take(&mut blog.content),
    };
    Ok(blog.into_draft(content))
}

fn read_upload(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?
        .to_string();
    Ok((file_name, data))
}

/// Prints each field error, then fails with the joined summary.
fn validated<T>(result: Result<T, ValidationErrors>) -> anyhow::Result<T> {
    result.map_err(|errors| {
        for error in errors.errors() {
            eprintln!("  {}: {}", error.field, error.message);
        }
        anyhow!(errors.summary())
    })
}

fn api_failure(err: ApiError, fallback: &str) -> anyhow::Error {
    folio_warn!("{}: {}", fallback, err);
    for detail in err.details() {
        eprintln!("  {detail}");
    }
    let message = err.user_message(fallback);
    if err.is_unauthorized() {
        anyhow!("{message}; {LOGIN_HINT}")
    } else {
        anyhow!(message)
    }
}

fn print_ack(ack: &AdminAck, default: &str) {
    println!("{}", ack.message.as_deref().unwrap_or(default));
}

fn format_magazine(magazine: &MagazineSummary) -> String {
    let date = magazine
        .date_of_publish
        .as_deref()
        .map(format_publish_date)
        .unwrap_or_default();
    format!(
        "{:<32} {:<40} {:>16} {:>4} pages",
        magazine.slug.as_deref().unwrap_or(&magazine.id),
        magazine.title,
        date,
        magazine.page_count
    )
}

fn print_blog_page(page: &BlogPage) {
    if page.posts.is_empty() {
        println!("No posts found");
        return;
    }
    for post in &page.posts {
        println!("{:<40} {}", post.slug, post.title);
    }
    if let Some(next) = page.next_page {
        println!("More: --page {next}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_failure_hints_at_login() {
        let err = api_failure(
            ApiError::Unauthorized {
                message: "Token expired".into(),
            },
            "Failed to delete blog",
        );
        assert_eq!(err.to_string(), format!("Token expired; {LOGIN_HINT}"));
    }

    #[test]
    fn validation_failure_is_summarized() {
        let result = validated(LoginForm::default().validate());
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid email; Password is required"
        );
    }
}
