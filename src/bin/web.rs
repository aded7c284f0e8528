//! Single binary web server: JSON API over the pairing wheel and bracket repository.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set TEAMS_CSV to a file with `id,name,members` rows to seed the team list at startup.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use sport_tour::{
    import_teams_csv, record_match_time, record_winner, spin_the_wheel, Bracket, BracketError,
    BracketRepository, ListOrder, MatchupSelector, MemoryStore, RepositoryError, StoreTeamSource,
    TeamId, TeamSource,
};

/// Session key holding the caller's identity (used as the bracket's `created_by`).
const USER_KEY: &str = "user_id";

struct AppState {
    brackets: BracketRepository<MemoryStore>,
    teams: StoreTeamSource<MemoryStore>,
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    user_id: String,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    #[serde(default)]
    name: String,
    /// Teams to put on the wheel; all teams when absent.
    #[serde(default)]
    team_ids: Option<Vec<TeamId>>,
    #[serde(default = "default_round")]
    round: u32,
}

fn default_round() -> u32 {
    1
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    selector: MatchupSelector,
    winner_id: TeamId,
}

#[derive(Deserialize)]
struct RecordTimeBody {
    selector: MatchupSelector,
    time: String,
}

/// Path segment: bracket id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: String,
}

fn repository_error(e: RepositoryError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        RepositoryError::NotFound(_) => HttpResponse::NotFound().json(body),
        RepositoryError::StoreUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        RepositoryError::Malformed { .. } => HttpResponse::InternalServerError().json(body),
    }
}

fn bracket_error(e: BracketError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "sport-tour",
    })
}

/// Remember who is calling. Authentication itself happens elsewhere.
#[post("/api/session")]
async fn api_login(session: Session, body: Json<LoginBody>) -> HttpResponse {
    let user_id = body.user_id.trim();
    if user_id.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Empty user id" }));
    }
    match session.insert(USER_KEY, user_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "user_id": user_id })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[delete("/api/session")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[get("/api/teams")]
async fn api_list_teams(state: State) -> HttpResponse {
    match state.teams.fetch_teams().await {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => repository_error(e),
    }
}

/// Spin the wheel over the chosen teams and save the resulting bracket.
#[post("/api/brackets")]
async fn api_create_bracket(state: State, session: Session, body: Json<CreateBracketBody>) -> HttpResponse {
    let mut teams = match state.teams.fetch_teams().await {
        Ok(teams) => teams,
        Err(e) => return repository_error(e),
    };
    if let Some(ids) = &body.team_ids {
        if let Some(unknown) = ids.iter().find(|id| !teams.iter().any(|t| &t.id == *id)) {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": format!("Unknown team {}", unknown) }));
        }
        teams.retain(|t| ids.contains(&t.id));
    }

    let matchups = match spin_the_wheel(&teams, body.round) {
        Ok(m) => m,
        Err(e) => return bracket_error(e),
    };
    let mut bracket = match Bracket::create(&body.name, &teams, matchups) {
        Ok(b) => b,
        Err(e) => return bracket_error(e),
    };
    match session.get::<String>(USER_KEY) {
        Ok(Some(user)) => bracket = bracket.with_creator(user),
        Ok(None) => {}
        Err(e) => log::warn!("Ignoring unreadable session: {}", e),
    }

    match state.brackets.save(&bracket).await {
        Ok(id) => {
            bracket.id = Some(id);
            HttpResponse::Ok().json(bracket)
        }
        Err(e) => repository_error(e),
    }
}

/// Bracket summaries, newest first.
#[get("/api/brackets")]
async fn api_list_brackets(state: State) -> HttpResponse {
    match state.brackets.list(ListOrder::NewestFirst).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => repository_error(e),
    }
}

#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: State, path: Path<BracketPath>) -> HttpResponse {
    match state.brackets.load(&path.id).await {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => repository_error(e),
    }
}

#[delete("/api/brackets/{id}")]
async fn api_delete_bracket(state: State, path: Path<BracketPath>) -> HttpResponse {
    match state.brackets.delete(&path.id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => repository_error(e),
    }
}

/// Record the winner of one matchup (load, apply, save back).
#[put("/api/brackets/{id}/winner")]
async fn api_record_winner(state: State, path: Path<BracketPath>, body: Json<RecordWinnerBody>) -> HttpResponse {
    let bracket = match state.brackets.load(&path.id).await {
        Ok(b) => b,
        Err(e) => return repository_error(e),
    };
    let updated = match record_winner(&bracket, &body.selector, &body.winner_id) {
        Ok(b) => b,
        Err(e) => return bracket_error(e),
    };
    match state.brackets.save(&updated).await {
        Ok(_) => HttpResponse::Ok().json(updated),
        Err(e) => repository_error(e),
    }
}

/// Set the free-form match time of one matchup (load, apply, save back).
#[put("/api/brackets/{id}/time")]
async fn api_record_time(state: State, path: Path<BracketPath>, body: Json<RecordTimeBody>) -> HttpResponse {
    let bracket = match state.brackets.load(&path.id).await {
        Ok(b) => b,
        Err(e) => return repository_error(e),
    };
    let updated = match record_match_time(&bracket, &body.selector, &body.time) {
        Ok(b) => b,
        Err(e) => return bracket_error(e),
    };
    match state.brackets.save(&updated).await {
        Ok(_) => HttpResponse::Ok().json(updated),
        Err(e) => repository_error(e),
    }
}

#[get("/api/stats")]
async fn api_stats(state: State) -> HttpResponse {
    match state.brackets.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => repository_error(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let store = MemoryStore::new();
    let state = Data::new(AppState {
        brackets: BracketRepository::new(store.clone()),
        teams: StoreTeamSource::new(store),
    });

    if let Ok(path) = std::env::var("TEAMS_CSV") {
        let file = std::fs::File::open(&path)?;
        let teams = import_teams_csv(file).map_err(|e| std::io::Error::other(e.to_string()))?;
        state
            .teams
            .seed(&teams)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        log::info!("Loaded {} teams from {}", teams.len(), path);
    }

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    // Cookie key is per process: sessions do not survive a restart.
    let key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(api_login)
            .service(api_logout)
            .service(api_list_teams)
            .service(api_create_bracket)
            .service(api_list_brackets)
            .service(api_get_bracket)
            .service(api_delete_bracket)
            .service(api_record_winner)
            .service(api_record_time)
            .service(api_stats)
    })
    .bind(bind)?
    .run()
    .await
}
