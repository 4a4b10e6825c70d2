//! CLI commands

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use quill_core::{Credentials, Post, PostDraft, PostPatch, decode_claims};
use quill_http::{BlogClient, SessionStatus};
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session in the data directory
    Login {
        /// Username (prompted for when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted for when omitted)
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and remove the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Read and manage posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// List posts
    List {
        /// Only posts written by the signed-in user
        #[arg(long)]
        mine: bool,
    },

    /// Show one post
    Show { id: u64 },

    /// Create a post
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,
    },

    /// Change the title and/or content of a post
    Edit {
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a post
    Delete {
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    pub async fn execute(self, client: &BlogClient) -> Result<()> {
        match self {
            Self::Login { username, password } => login(client, username, password).await,
            Self::Logout => {
                client.session().logout();
                println!("Logged out");
                Ok(())
            }
            Self::Whoami => {
                whoami(client);
                Ok(())
            }
            Self::Posts { command } => command.execute(client).await,
        }
    }
}

impl PostCommands {
    pub async fn execute(self, client: &BlogClient) -> Result<()> {
        match self {
            Self::List { mine } => {
                let posts = if mine {
                    let username = signed_in_username(client)?;
                    client.api().list_posts_by(&username).await?
                } else if client.session().is_authenticated() {
                    client.api().list_posts().await?
                } else {
                    client.public().list_posts().await?
                };
                print_post_list(&posts);
                Ok(())
            }
            Self::Show { id } => {
                let post = client.api().get_post(id).await?;
                print_post(&post);
                Ok(())
            }
            Self::Create { title, content } => {
                signed_in_username(client)?;
                let post = client
                    .api()
                    .create_post(&PostDraft::new(title, content))
                    .await?;
                println!("Created post {}", post.id);
                Ok(())
            }
            Self::Edit { id, title, content } => {
                let patch = PostPatch { title, content };
                if patch.is_empty() {
                    bail!("Nothing to change; pass --title and/or --content");
                }
                signed_in_username(client)?;
                let post = client.api().update_post(id, &patch).await?;
                println!("Updated post {}", post.id);
                Ok(())
            }
            Self::Delete { id, yes } => {
                signed_in_username(client)?;
                if !yes && !confirm(&format!("Delete post {id}?"))? {
                    println!("Cancelled");
                    return Ok(());
                }
                client.api().delete_post(id).await?;
                println!("Deleted post {id}");
                Ok(())
            }
        }
    }
}

async fn login(
    client: &BlogClient,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };

    let identity = client
        .session()
        .login(&Credentials::new(username, password))
        .await?;
    println!("Logged in as {}", identity.username);
    Ok(())
}

fn whoami(client: &BlogClient) {
    let SessionStatus::Authenticated(identity) = client.session().status() else {
        println!("Not logged in");
        return;
    };

    let expiry = client
        .session()
        .credentials()
        .and_then(|pair| decode_claims(&pair.access).ok())
        .and_then(|claims| claims.expires_at());

    match expiry {
        Some(expires_at) if expires_at <= Utc::now() => println!(
            "{} (access token expired at {expires_at}; it is renewed on the next request)",
            identity.username
        ),
        Some(expires_at) => println!(
            "{} (access token valid until {expires_at})",
            identity.username
        ),
        None => println!("{}", identity.username),
    }
}

fn signed_in_username(client: &BlogClient) -> Result<String> {
    match client.session().identity() {
        Some(identity) => Ok(identity.username),
        None => bail!("Not logged in; run `quill login` first"),
    }
}

fn print_post_list(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts yet");
        return;
    }
    for post in posts {
        println!(
            "{:>5}  {}  by {}  ({})",
            post.id,
            post.title,
            post.author_username,
            post.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_post(post: &Post) {
    println!("# {}", post.title);
    println!(
        "by {} on {}",
        post.author_username,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    if post.updated_at != post.created_at {
        println!("updated {}", post.updated_at.format("%Y-%m-%d %H:%M"));
    }
    println!();
    println!("{}", post.content);
}

fn prompt(label: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        bail!("{label} is required");
    }
    Ok(value)
}

fn confirm(question: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    debug!(answer = %answer, "Confirmation answered");
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
