use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use tabled::Table;

use crate::{
    cli::{SourceKind, prompt},
    config, error,
    error::Res,
    info,
    mixer::SubstitutionEngine,
    spotify::{
        AuthSession, ChunkFailurePolicy, SpotifyClient,
        playlist::{append_tracks, create_playlist},
    },
    success,
    types::{CategoryTableRow, PlaylistSource, PlaylistTableRow, SourcePlaylist},
    utils, warning,
};

#[derive(Debug, Clone, Default)]
pub struct MixOptions {
    pub source: Option<SourceKind>,
    pub category: Option<String>,
    pub playlist: Option<String>,
    pub seed: Option<u64>,
    pub abort_on_write_error: bool,
    pub no_browser: bool,
}

pub async fn mix(opts: MixOptions) {
    if let Err(e) = run(opts).await {
        error!("{}", e);
    }
}

async fn run(opts: MixOptions) -> Res<()> {
    let accounts_url = config::spotify_accounts_url();
    let mut session = AuthSession::new(
        config::spotify_client_id()?,
        config::spotify_client_secret()?,
        config::redirect_base(),
        config::server_port()?,
    );
    let token = session.authorize(&accounts_url, !opts.no_browser).await?;
    success!("Access token received.");

    let client = SpotifyClient::new(config::spotify_api_url(), token);
    let user_id = client.current_user_id().await?;

    let source_kind = match opts.source {
        Some(kind) => kind,
        None => prompt::ask_source()?,
    };
    let source = match source_kind {
        SourceKind::User => select_from_library(&client, opts.playlist).await?,
        SourceKind::Spotify => select_from_category(&client, opts.category, opts.playlist).await?,
    };

    let playlist = with_spinner(
        format!("Loading tracks of {}...", source.name),
        client.load_playlist(&source),
    )
    .await?;
    print_tracks(&playlist);

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let pb = ProgressBar::new(playlist.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let engine = SubstitutionEngine::new(&client).with_progress(pb.clone());
    let substitutions = engine.substitute_all(&playlist, &mut rng).await;
    pb.finish_and_clear();

    for (pos, s) in substitutions.iter().enumerate() {
        if s.replaced {
            info!("#{} {} -> {} ({}, {} candidates)", pos + 1, s.original_name, s.name, s.pool, s.pool_size);
        } else {
            warning!("#{} {} kept, no usable candidate in {}", pos + 1, s.original_name, s.pool);
        }
    }

    let handle = create_playlist(&client, &user_id, &playlist.name).await?;
    success!("New playlist made: {}", handle.href);

    let uris: Vec<String> = substitutions.into_iter().map(|s| s.uri).collect();
    let policy = if opts.abort_on_write_error {
        ChunkFailurePolicy::Abort
    } else {
        ChunkFailurePolicy::Continue
    };

    let report = append_tracks(&client, &handle, &uris, policy).await?;
    if report.is_complete() {
        success!("{} tracks have been added!", report.tracks_written);
    } else {
        warning!(
            "{} of {} tracks added; {} chunk(s) failed.",
            report.tracks_written,
            uris.len(),
            report.failures.len()
        );
    }

    Ok(())
}

async fn select_from_library(client: &SpotifyClient, name: Option<String>) -> Res<PlaylistSource> {
    let playlists = with_spinner("Fetching your playlists...", client.list_owned_playlists()).await?;

    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            id: p.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    let name = match name {
        Some(n) => n,
        None => prompt::ask("Which playlist? (case sensitive)")?,
    };
    utils::select_owned(&playlists, &name)
}

async fn select_from_category(
    client: &SpotifyClient,
    category: Option<String>,
    name: Option<String>,
) -> Res<PlaylistSource> {
    let categories = with_spinner("Fetching categories...", client.list_categories()).await?;

    let rows: Vec<CategoryTableRow> = categories
        .iter()
        .map(|(name, id)| CategoryTableRow {
            name: name.clone(),
            id: id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    let category = match category {
        Some(c) => c,
        None => prompt::ask("Which category? (case sensitive)")?,
    };
    let category_id = utils::select_category(&categories, &category)?;

    let playlists = with_spinner(
        format!("Fetching playlists for {}...", category),
        client.list_playlists_in_category(category_id),
    )
    .await?;

    info!("Playlists for {} category:", category.to_uppercase());
    for name in playlists.keys() {
        println!("  {}", name);
    }

    let name = match name {
        Some(n) => n,
        None => prompt::ask("Which playlist? (case sensitive)")?,
    };
    utils::select_in_category(&playlists, &name)
}

fn print_tracks(playlist: &SourcePlaylist) {
    info!("{} ({} tracks)", playlist.name, playlist.len());
    for (pos, track) in playlist.tracks.iter().enumerate() {
        println!(
            "  #{} {} - {} [{:?}: {}]",
            pos + 1,
            track.name,
            track.artist.name,
            track.album.album_type,
            track.album.name
        );
    }
}

async fn with_spinner<T>(msg: impl Into<String>, fut: impl Future<Output = T>) -> T {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let out = fut.await;
    pb.finish_and_clear();
    out
}
