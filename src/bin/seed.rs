//! Wipes the database and fills it with demo students, projects, reviews and
//! messages. Every seeded account logs in with the password `123123`.

use rand::{seq::SliceRandom, Rng};

use ironprojects::{
    auth::password::hash_password,
    config::AppConfig,
    db::{MessageRepo, PgStore, ProjectRepo, ReviewRepo, UserRepo},
    messages::repo_types::NewMessage,
    projects::repo_types::{NewProject, Project},
    reviews::repo_types::NewReview,
    users::repo_types::{NewUser, User},
};

const PROMOTIONS: [&str; 5] = ["01.2024", "02.2024", "03.2024", "01.2025", "02.2025"];
const STUDENTS_PER_PROMOTION: usize = 10;
const PASSWORD: &str = "123123";
const MESSAGES: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Linus", "Ken", "Barbara", "Alan", "Margaret", "Dennis", "Radia", "Guido",
    "Hedy", "Tim", "Frances", "Bjarne", "Katherine", "John", "Anita", "Edsger", "Sophie",
    "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Torvalds", "Thompson", "Liskov", "Turing", "Hamilton", "Ritchie",
    "Perlman", "Rossum", "Lamarr", "Berners", "Allen", "Stroustrup", "Johnson", "Carmack", "Borg",
    "Dijkstra", "Wilson", "Matsumoto",
];

const LANGUAGES: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "Ruby", "Go", "Rust", "C#", "PHP", "Swift",
];

const CITIES: &[&str] = &[
    "Madrid", "Barcelona", "Lisboa", "Miami", "México DF", "São Paulo", "Berlín", "Ámsterdam",
    "París", "Remote",
];

const MODULE_1_TITLES: &[&str] = &[
    "Memory Game", "Snake Game", "Trivia Quiz", "Tic Tac Toe", "Whack-a-Mole", "Space Invaders",
    "Hangman", "Simon Says", "Breakout Clone", "Pong Classic",
];

const MODULE_2_TITLES: &[&str] = &[
    "Recipe Manager", "Task Tracker", "Job Board", "Blog Platform", "Expense Tracker",
    "Inventory System", "Booking App", "Survey Builder", "Wiki Engine", "Event Planner",
];

const MODULE_3_TITLES: &[&str] = &[
    "Crypto Dashboard", "Movie Watchlist", "Habit Tracker", "Chat App", "Fitness Logger",
    "Music Explorer", "Weather Station", "Recipe Finder", "Travel Planner", "Portfolio Builder",
];

const REVIEW_COMMENTS: &[&str] = &[
    "Great project! Really clean code and well-structured.",
    "Nice work! The UI looks amazing. Could use more error handling though.",
    "Impressive for this module level. Keep it up!",
    "Solid implementation. I love the attention to detail.",
    "Good project overall. The functionality works well.",
    "Really creative approach! Learned something new looking at your code.",
    "Well done! The design is very intuitive and user-friendly.",
    "Interesting project idea. The execution could be improved a bit.",
    "Awesome work! One of the best projects in our promotion.",
    "Clean and functional. Would love to see more features added.",
];

const MESSAGE_SUBJECTS: &[&str] = &[
    "Hey! Love your project",
    "Question about your code",
    "Want to collaborate?",
    "Great work on Module project!",
    "Need help with something",
    "Feedback on your project",
    "Let's connect!",
    "Study group this weekend?",
    "Job opportunity I found",
    "Tips for the next module",
];

const MESSAGE_BODIES: &[&str] = &[
    "I saw your project on the board and wanted to ask how you handled the state updates.",
    "Would you be up for pairing on the next module? I think our styles would fit well.",
    "Thanks for the review on my project, the tip about error handling really helped.",
    "There is a meetup next Thursday about web performance, want to join?",
    "Could you share the resources you used for the final project? They looked great.",
];

fn titles_for(module: i16) -> &'static [&'static str] {
    match module {
        1 => MODULE_1_TITLES,
        2 => MODULE_2_TITLES,
        _ => MODULE_3_TITLES,
    }
}

fn description_for(module: i16) -> &'static str {
    match module {
        1 => concat!(
            "A fun browser game built with vanilla HTML, CSS, and JavaScript. ",
            "Features DOM manipulation, event handling, and responsive design."
        ),
        2 => concat!(
            "A full-stack web application with a REST API, a relational database, ",
            "user authentication and server-side rendering."
        ),
        _ => concat!(
            "A modern single-page application with client-side routing, state management, ",
            "API integration, and a polished UI."
        ),
    }
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn pick<'a, R: Rng>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

async fn seed_users(store: &PgStore, rng: &mut impl Rng) -> anyhow::Result<Vec<User>> {
    let password_hash = hash_password(PASSWORD)?;
    let mut users = Vec::with_capacity(PROMOTIONS.len() * STUDENTS_PER_PROMOTION);

    for promotion in PROMOTIONS {
        for _ in 0..STUDENTS_PER_PROMOTION {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let username = format!(
                "{}.{}{}",
                first.to_lowercase(),
                last.to_lowercase(),
                users.len()
            );
            let language_count = rng.gen_range(1..=4);
            let languages = LANGUAGES
                .choose_multiple(rng, language_count)
                .map(|l| l.to_string())
                .collect();

            let user = store
                .insert_user(NewUser {
                    email: format!("{username}@ironhack.edu"),
                    password_hash: password_hash.clone(),
                    name: format!("{first} {last}"),
                    bio: Some(format!(
                        "{first} is a {promotion} student who enjoys building things."
                    )),
                    github_url: Some(format!("https://github.com/{username}")),
                    linkedin_url: Some(format!("https://linkedin.com/in/{username}")),
                    location: Some(pick(rng, CITIES).to_string()),
                    languages,
                    avatar_url: Some(format!("https://i.pravatar.cc/300?u={username}")),
                    promotion: Some(promotion.to_string()),
                })
                .await?;
            users.push(user);
        }
    }
    Ok(users)
}

async fn seed_projects(
    store: &PgStore,
    rng: &mut impl Rng,
    users: &[User],
) -> anyhow::Result<Vec<Project>> {
    let mut projects = Vec::with_capacity(users.len() * 3);
    for user in users {
        let username = user.email.split('@').next().unwrap_or_default();
        for module in 1..=3i16 {
            let title = pick(rng, titles_for(module));
            let slug = slugify(title);
            let image_count = rng.gen_range(1..=3);
            let images = (0..image_count)
                .map(|_| format!("https://picsum.photos/seed/{}/640/480", rng.gen::<u32>()))
                .collect();

            let project = store
                .insert_project(NewProject {
                    title: title.to_string(),
                    description: description_for(module).to_string(),
                    module,
                    github_repo: Some(format!("https://github.com/{username}/{slug}")),
                    live_url: Some(format!("https://{username}-{slug}.example.app")),
                    images,
                    author_id: user.id,
                    promotion: user.promotion.clone(),
                })
                .await?;
            projects.push(project);
        }
    }
    Ok(projects)
}

async fn seed_reviews(
    store: &PgStore,
    rng: &mut impl Rng,
    users: &[User],
    projects: &[Project],
) -> anyhow::Result<usize> {
    let mut count = 0;
    for project in projects {
        let others: Vec<&User> = users.iter().filter(|u| u.id != project.author_id).collect();
        let amount = rng.gen_range(0..=5);
        let reviewers: Vec<&User> = others
            .choose_multiple(rng, amount)
            .copied()
            .collect();
        for reviewer in reviewers {
            store
                .insert_review(NewReview {
                    comment: pick(rng, REVIEW_COMMENTS).to_string(),
                    rating: rng.gen_range(1..=5),
                    author_id: reviewer.id,
                    project_id: project.id,
                })
                .await?;
            count += 1;
        }
    }
    Ok(count)
}

async fn seed_messages(store: &PgStore, rng: &mut impl Rng, users: &[User]) -> anyhow::Result<()> {
    if users.len() < 2 {
        return Ok(());
    }
    for _ in 0..MESSAGES {
        let pair: Vec<&User> = users.choose_multiple(rng, 2).collect();
        store
            .insert_message(NewMessage {
                sender_id: pair[0].id,
                receiver_id: pair[1].id,
                subject: pick(rng, MESSAGE_SUBJECTS).to_string(),
                body: pick(rng, MESSAGE_BODIES).to_string(),
                read: rng.gen_bool(0.5),
            })
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info,ironprojects=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = PgStore::connect(&config).await?;
    store.migrate().await;

    store.wipe().await?;
    tracing::info!("database wiped");

    let mut rng = rand::thread_rng();

    let users = seed_users(&store, &mut rng).await?;
    tracing::info!(count = users.len(), "users created");

    let projects = seed_projects(&store, &mut rng, &users).await?;
    tracing::info!(count = projects.len(), "projects created");

    let reviews = seed_reviews(&store, &mut rng, &users, &projects).await?;
    tracing::info!(count = reviews, "reviews created");

    seed_messages(&store, &mut rng, &users).await?;
    tracing::info!(count = MESSAGES, "messages created");

    store.close().await;
    tracing::info!("seed complete");
    Ok(())
}
