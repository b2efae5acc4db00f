use flatdb::{
    dispatcher::{is_affirmative, HELP},
    DbConfig, DbError, Dispatcher, JsonFileStorage, Reply,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = ">>> Enter command: ";

async fn say(stdout: &mut Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}

/// Next input line; `None` on end of input, Ctrl-C or a read error.
async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    tokio::select! {
        line = lines.next_line() => match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                None
            }
        },
        _ = tokio::signal::ctrl_c() => None,
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = DbConfig::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        metadata_file = %config.metadata_file.display(),
        "opening database"
    );
    let mut dispatcher = Dispatcher::new(JsonFileStorage::new(&config), config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    say(&mut stdout, &format!("{HELP}\n\n")).await?;
    loop {
        say(&mut stdout, PROMPT).await?;
        let Some(line) = read_line(&mut lines).await else {
            break;
        };

        let mut reply = dispatcher.execute(&line);
        if let Reply::Confirm(pending) = reply {
            say(&mut stdout, &pending.prompt).await?;
            let confirmed = read_line(&mut lines).await.is_some_and(|answer| is_affirmative(&answer));
            reply = dispatcher.resume(pending, confirmed);
        }

        match reply {
            Reply::Message(message) => say(&mut stdout, &format!("{message}\n")).await?,
            Reply::Cancelled => say(&mut stdout, &format!("{}\n", DbError::Cancelled)).await?,
            Reply::Exit => break,
            Reply::Nothing | Reply::Confirm(_) => {}
        }
    }

    info!("bye");
    Ok(())
}
