//! Interactive terminal client for the notebook service.

use chrono::Local;
use clap::Parser;
use notebook_service::config::{ClientConfig, defaults};
use notebook_service::rpc_client::{ClientError, NotebookClient};
use notebook_types::{AddNoteRequest, Note, NotesListing};
use std::io::{self, Write};

/// Print `label` and read one trimmed line; `None` on end of input
fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn report_error(client: &NotebookClient, e: &ClientError) {
    match e {
        ClientError::Transport(_) => {
            println!(
                "Could not reach the notebook service at {}: {}",
                client.base_url(),
                e
            );
            println!("Check that the server is running, then try again.");
        }
        _ => println!("Request failed: {}", e),
    }
}

fn print_note(note: &Note) {
    println!("----");
    println!("Text: {}", note.text);
    println!("Timestamp: {}", note.timestamp);
    if !note.wikipedia_link.is_empty() {
        println!("Wikipedia link: {}", note.wikipedia_link);
    }
    if !note.wikipedia_extract.is_empty() {
        println!("Wikipedia extract: {}", note.wikipedia_extract);
    }
}

async fn add_note(client: &NotebookClient) -> Option<()> {
    let topic = prompt("Enter topic: ")?;
    let text = prompt("Enter note text: ")?;
    let timestamp = Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();
    let search_term = prompt("Enter search term for Wikipedia (or leave blank): ")?;

    let req = AddNoteRequest {
        topic,
        text,
        timestamp,
        search_term,
    };
    match client.add_note(&req).await {
        Ok(message) => println!("Server response: {}", message),
        Err(e) => report_error(client, &e),
    }
    Some(())
}

async fn get_notes(client: &NotebookClient) -> Option<()> {
    let topic = prompt("Enter topic to retrieve notes: ")?;

    match client.get_notes(&topic).await {
        Ok(NotesListing::NoDatabase { message }) => println!("Server response: {}", message),
        Ok(NotesListing::Notes { notes }) if notes.is_empty() => {
            println!("No notes found for this topic.")
        }
        Ok(NotesListing::Notes { notes }) => {
            println!("Notes for topic '{}':", topic);
            notes.iter().for_each(print_note);
        }
        Err(e) => report_error(client, &e),
    }
    Some(())
}

async fn show_status(client: &NotebookClient) {
    match client.status().await {
        Ok(status) => println!(
            "Service up for {}s: {} topics, {} notes ({} added this run)",
            status.uptime_secs, status.topic_count, status.note_count, status.notes_added
        ),
        Err(e) => report_error(client, &e),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = ClientConfig::parse();

    let url = match config.url {
        Some(url) => url,
        None => {
            let Some(input) = prompt(&format!(
                "Enter server URL (default {}): ",
                defaults::SERVICE_URL
            )) else {
                return;
            };
            if input.is_empty() {
                defaults::SERVICE_URL.to_string()
            } else {
                input
            }
        }
    };
    let client = NotebookClient::new(&url);

    loop {
        println!("\n--- Notebook Client ---");
        println!("1. Add a note");
        println!("2. Get notes by topic");
        println!("3. Service status");
        println!("4. Exit");

        let Some(choice) = prompt("Enter your choice: ") else {
            break;
        };

        let completed = match choice.as_str() {
            "1" => add_note(&client).await,
            "2" => get_notes(&client).await,
            "3" => {
                show_status(&client).await;
                Some(())
            }
            "4" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Some(())
            }
        };

        // End of input mid-prompt
        if completed.is_none() {
            break;
        }
    }

    println!("Exiting client.");
}
