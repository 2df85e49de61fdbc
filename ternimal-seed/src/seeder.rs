use std::time::Duration;

use tokio::time::sleep;

use crate::api::{ApiClient, ApiResult};
use ternimal_types::{CreateCommentRequest, CreateThreadRequest, Thread, User};

/// Courtesy delay between requests; the public deployment rate-limits.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Usernames registered during seeding.
pub const SEED_USERS: [&str; 4] = ["arch_user", "linux_admin", "terminal_ninja", "rust_dev"];

/// Threads posted during seeding: (title, content, author).
pub const SEED_THREADS: [(&str, &str, &str); 5] = [
    (
        "Welcome to TERNIMAL!",
        "This is the official forum for the TERNIMAL terminal forum client. Feel free to discuss features, report bugs, or share your terminal setups!",
        "arch_user",
    ),
    (
        "Best terminal emulators?",
        "What's your favorite terminal emulator? I've been using Alacritty lately but curious what others prefer.",
        "linux_admin",
    ),
    (
        "Rust in terminal apps",
        "Building terminal apps with Rust is amazing! The performance and safety are unmatched. What terminal apps have you built?",
        "rust_dev",
    ),
    (
        "Productivity tips",
        "Share your best terminal productivity tips! I'll start: tmux + vim + fzf is my holy trinity.",
        "terminal_ninja",
    ),
    (
        "Arch vs other distros",
        "Why did you choose Arch Linux? Was it the AUR, the rolling release, or something else?",
        "arch_user",
    ),
];

/// Comments posted during seeding: (index into the list of successfully
/// created threads, content, author). Indexes past the end are skipped, so a
/// failed thread creation shifts attachment rather than aborting it.
pub const SEED_COMMENTS: [(usize, &str, &str); 5] = [
    (
        1,
        "I'm still using gnome-terminal. It's simple and works well.",
        "arch_user",
    ),
    (
        1,
        "Try Kitty! It's fast and has great GPU acceleration.",
        "terminal_ninja",
    ),
    (
        1,
        "WezTerm is my favorite - cross platform and highly configurable.",
        "rust_dev",
    ),
    (
        2,
        "I built a file manager in Rust! The compile times are worth it.",
        "rust_dev",
    ),
    (
        2,
        "How's the binary size compared to C?",
        "linux_admin",
    ),
];

/// Statistics collected during a seeding run
#[derive(Debug, Default, Clone)]
pub struct SeedStats {
    /// Users freshly registered
    pub users_created: usize,
    /// Users the server already knew (non-fatal)
    pub users_existing: usize,
    /// Threads created
    pub threads_created: usize,
    /// Comments created
    pub comments_created: usize,
    /// Threads deleted during clearing
    pub threads_deleted: usize,
    /// Comments deleted during clearing
    pub comments_deleted: usize,
    /// Errors encountered; none of them stop the run
    pub errors: Vec<String>,
}

impl SeedStats {
    /// Record an error
    pub fn record_error(&mut self, error: String) {
        log::warn!("{}", error);
        self.errors.push(error);
    }
}

/// Drives a full clear-then-seed pass against a forum server. Every remote
/// operation is best-effort: failures are printed, recorded in the stats,
/// and the run continues.
pub struct Seeder {
    client: ApiClient,
    pacing: Duration,
    stats: SeedStats,
}

impl Seeder {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            pacing: DEFAULT_PACING,
            stats: SeedStats::default(),
        }
    }

    /// Override the delay between requests. Tests run with `Duration::ZERO`.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn stats(&self) -> &SeedStats {
        &self.stats
    }

    /// Fixed sequence: clear, let the server settle, then seed.
    pub async fn run(&mut self) {
        self.clear().await;
        sleep(self.pacing * 2).await;
        self.seed().await;
    }

    /// Best-effort wipe of all threads and their comments. Never fails: the
    /// first transport error abandons the rest of the wipe with a printed
    /// message, and unsuccessful deletes are not verified.
    pub async fn clear(&mut self) {
        println!("Clearing existing forum data...");
        match self.clear_inner().await {
            Ok(()) => println!("Forum cleared!"),
            Err(e) => {
                println!("Error clearing forum: {}", e);
                self.stats.record_error(format!("Error clearing forum: {}", e));
            }
        }
    }

    async fn clear_inner(&mut self) -> ApiResult<()> {
        let threads = self.client.list_threads().await?;
        for thread in threads {
            let comments = self.client.list_comments(&thread.id).await?;
            for comment in comments {
                match self.client.delete_comment(&comment.id).await {
                    Ok(()) => self.stats.comments_deleted += 1,
                    // Unverified wipe: a rejected delete is skipped
                    Err(e) if e.is_status() => {
                        log::warn!("delete comment {} rejected: {}", comment.id, e);
                    }
                    Err(e) => return Err(e),
                }
            }
            match self.client.delete_thread(&thread.id).await {
                Ok(()) => self.stats.threads_deleted += 1,
                Err(e) if e.is_status() => {
                    log::warn!("delete thread {} rejected: {}", thread.id, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Seed the forum with the fixed sample content.
    pub async fn seed(&mut self) {
        println!("Seeding forum with sample content...");

        // Create users
        for username in SEED_USERS {
            self.create_user(username).await;
            sleep(self.pacing).await; // Rate limiting
        }

        // Create threads, keeping the successes in creation order
        let mut created_threads: Vec<Thread> = Vec::new();
        for (title, content, author) in SEED_THREADS {
            if let Some(thread) = self.create_thread(title, content, author).await {
                created_threads.push(thread);
            }
            sleep(self.pacing).await; // Rate limiting
        }

        // Attach comments to specific threads by creation-order index
        for (thread_index, content, author) in SEED_COMMENTS {
            if let Some(thread) = created_threads.get(thread_index) {
                let thread_id = thread.id.clone();
                self.create_comment(&thread_id, content, author).await;
                sleep(self.pacing).await;
            }
        }

        println!();
        println!("Forum seeded successfully!");
    }

    /// Register one user. A non-success status means the username is likely
    /// taken and yields the `existing` placeholder; transport and decode
    /// failures yield `None`.
    pub async fn create_user(&mut self, username: &str) -> Option<User> {
        match self.client.register_user(username).await {
            Ok(user) => {
                println!("Created user: {}", user.username);
                log::info!("registered user {} (id {})", user.username, user.id);
                self.stats.users_created += 1;
                Some(user)
            }
            Err(e) if e.is_status() => {
                println!("User {} might already exist", username);
                log::info!("register {} returned non-success: {}", username, e);
                self.stats.users_existing += 1;
                Some(User::existing(username))
            }
            Err(e) => {
                println!("Error creating user {}: {}", username, e);
                self.stats
                    .record_error(format!("Error creating user {}: {}", username, e));
                None
            }
        }
    }

    /// Post one thread; `None` on any failure.
    pub async fn create_thread(
        &mut self,
        title: &str,
        content: &str,
        author: &str,
    ) -> Option<Thread> {
        let request = CreateThreadRequest {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
        };
        match self.client.create_thread(&request).await {
            Ok(thread) => {
                println!("Created thread: {}", thread.title);
                log::info!("created thread {:?} (id {})", thread.title, thread.id);
                self.stats.threads_created += 1;
                Some(thread)
            }
            Err(e) => {
                println!("Error creating thread {}: {}", title, e);
                self.stats
                    .record_error(format!("Error creating thread {}: {}", title, e));
                None
            }
        }
    }

    /// Post one comment; the outcome is only logged and counted.
    pub async fn create_comment(&mut self, thread_id: &str, content: &str, author: &str) {
        let request = CreateCommentRequest {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
            author: author.to_string(),
        };
        match self.client.create_comment(&request).await {
            Ok(comment) => {
                println!("Added comment to thread {}", thread_id);
                log::info!("created comment {} on thread {}", comment.id, thread_id);
                self.stats.comments_created += 1;
            }
            Err(e) => {
                println!("Error adding comment: {}", e);
                self.stats
                    .record_error(format!("Error adding comment: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_content_has_expected_counts() {
        assert_eq!(SEED_USERS.len(), 4);
        assert_eq!(SEED_THREADS.len(), 5);
        assert_eq!(SEED_COMMENTS.len(), 5);
    }

    #[test]
    fn seed_thread_titles_match_fixture() {
        let titles: Vec<&str> = SEED_THREADS.iter().map(|(title, _, _)| *title).collect();
        assert_eq!(
            titles,
            vec![
                "Welcome to TERNIMAL!",
                "Best terminal emulators?",
                "Rust in terminal apps",
                "Productivity tips",
                "Arch vs other distros",
            ]
        );
    }

    #[test]
    fn seed_authors_are_seed_users() {
        for (title, _, author) in SEED_THREADS {
            assert!(
                SEED_USERS.contains(&author),
                "thread {:?} has unknown author {:?}",
                title,
                author
            );
        }
        for (_, content, author) in SEED_COMMENTS {
            assert!(
                SEED_USERS.contains(&author),
                "comment {:?} has unknown author {:?}",
                content,
                author
            );
        }
    }

    #[test]
    fn seed_comments_target_second_and_third_threads() {
        let on_second = SEED_COMMENTS.iter().filter(|(i, _, _)| *i == 1).count();
        let on_third = SEED_COMMENTS.iter().filter(|(i, _, _)| *i == 2).count();
        assert_eq!(on_second, 3, "\"Best terminal emulators?\" gets 3 comments");
        assert_eq!(on_third, 2, "\"Rust in terminal apps\" gets 2 comments");
        assert!(SEED_COMMENTS.iter().all(|(i, _, _)| *i == 1 || *i == 2));
    }

    #[test]
    fn record_error_accumulates() {
        let mut stats = SeedStats::default();
        stats.record_error("first".to_string());
        stats.record_error("second".to_string());
        assert_eq!(stats.errors, vec!["first", "second"]);
    }
}
