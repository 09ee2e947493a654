use std::sync::Arc;

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use slotbook::config::AppConfig;
use slotbook::controllers::{BookingController, ChatController};
use slotbook::markdown;
use slotbook::models::{ContactField, Origin};
use slotbook::services::chat::openrouter::OpenRouterProvider;
use slotbook::services::host::ParentProcessBridge;
use slotbook::services::scheduling::webhook::WebhookScheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let scheduler = Arc::new(WebhookScheduler::new(
        config.check_booking_url.clone(),
        config.make_booking_url.clone(),
    ));
    let booking = BookingController::new(
        scheduler,
        Arc::new(ParentProcessBridge),
        config.embedded,
    );
    let chat = ChatController::new(Arc::new(OpenRouterProvider::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    )));

    println!("Learning Booking System");
    println!("Book your appointment with time slot selection\n");
    print_help();

    booking.initialize().await;
    print_booking(&booking);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "hours" => print_hours(),
            "name" => booking.on_field_change(ContactField::Name, rest),
            "email" => booking.on_field_change(ContactField::Email, rest),
            "phone" => booking.on_field_change(ContactField::Phone, rest),
            "date" => match NaiveDate::parse_from_str(rest, "%Y-%m-%d") {
                Ok(date) => booking.on_date_change(date).await,
                Err(_) => println!("expected a date like 2025-07-01"),
            },
            "slot" => booking.on_slot_select(rest),
            "dismiss" => booking.dismiss_notification(),
            "submit" => booking.submit().await,
            "chat" => {
                chat.send_message(rest).await;
                print_chat(&chat);
                continue;
            }
            other => println!("unknown command: {other} (try `help`)"),
        }

        print_booking(&booking);
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  name <full name>     email <address>     phone <number>");
    println!("  date <YYYY-MM-DD>    slot <HH:MM>        submit");
    println!("  chat <message>       hours               dismiss");
    println!("  quit");
    println!();
}

fn print_hours() {
    println!("Business Hours");
    println!("  Days:   Monday to Friday");
    println!("  Hours:  9:30 AM - 9:30 PM Malaysia time");
    println!("  Closed: 12:30 PM - 2:30 PM (lunch), 6:30 PM - 8:30 PM (dinner)");
    println!();
}

fn print_booking(booking: &BookingController) {
    let state = booking.state();

    println!("date: {}", state.draft.date);
    if state.loading() {
        println!("loading time slots...");
    } else if state.slots.is_empty() {
        println!("no time slots available for this date");
    } else {
        for slot in &state.slots {
            let marker = if state.draft.selected_slot.as_deref() == Some(slot.time.as_str()) {
                ">"
            } else if slot.available {
                " "
            } else {
                "x"
            };
            println!("  [{marker}] {} ({})", slot.display, slot.time);
        }
    }

    if let Some(note) = booking.notification() {
        println!("[{}] {}", note.severity.as_str(), note.message);
    }
    println!();
}

fn print_chat(chat: &ChatController) {
    if let Some(msg) = chat.messages().last() {
        match msg.origin {
            Origin::User => println!("you: {}", msg.text),
            Origin::Assistant => println!("assistant: {}", markdown::render(&msg.text)),
        }
    }
    println!();
}
