use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use velvet_core::{ArcanaId, GameConfig, GameSession, Outcome, Rejection};

pub fn run(db: &Path, name: &str, seed: u64) -> Result<(), String> {
    let store = super::open_store(db)?;
    let config = GameConfig::default().with_seed(seed);
    let mut session = GameSession::open(store, name, config)
        .map_err(|e| format!("failed to open session: {e}"))?;

    println!("  {} the Velvet Room, {name}.", "Welcome to".bold());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print_status(&session)?;
        print_menu();

        let Some(choice) = prompt(&mut reader, &mut line, "Choose an option (1-6): ")? else {
            break; // EOF
        };
        match choice.as_str() {
            "1" => view_stock(&session)?,
            "2" => view_arcanas(&mut reader, &mut line, &session)?,
            "3" => summon(&mut session)?,
            "4" => release(&mut reader, &mut line, &mut session)?,
            "5" => fuse(&mut reader, &mut line, &mut session)?,
            "6" | "q" | "quit" | "exit" => break,
            "" => {}
            _ => println!("  {}", "Invalid option, choose 1-6.".yellow()),
        }
    }

    println!("  Farewell. We look forward to your next visit.");
    Ok(())
}

fn print_status(session: &GameSession) -> Result<(), String> {
    let player = session.player();
    let count = session.stock_count().map_err(|e| e.to_string())?;
    println!(
        "\n  Level {} | Stock {}/{}",
        player.level.to_string().bold(),
        count,
        session.stock_capacity()
    );
    Ok(())
}

fn print_menu() {
    println!("  1. View stock");
    println!("  2. View arcanas");
    println!("  3. Summon a persona");
    println!("  4. Release a persona");
    println!("  5. Fuse personas");
    println!("  6. Exit");
}

/// Print a prompt and read one trimmed line. `None` means EOF.
fn prompt(
    reader: &mut impl BufRead,
    line: &mut String,
    text: &str,
) -> Result<Option<String>, String> {
    print!("{text}");
    io::stdout().flush().map_err(|e| e.to_string())?;
    line.clear();
    match reader.read_line(line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}

fn view_stock(session: &GameSession) -> Result<(), String> {
    let entries = session.list_stock().map_err(|e| e.to_string())?;
    if entries.is_empty() {
        println!("  You have no personas in your stock.");
        return Ok(());
    }
    println!("  Your personas:");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  {}. {} (Level {}, Arcana: {})",
            i + 1,
            entry.name,
            entry.level,
            entry.arcana_name
        );
    }
    Ok(())
}

fn view_arcanas(
    reader: &mut impl BufRead,
    line: &mut String,
    session: &GameSession,
) -> Result<(), String> {
    let arcanas = session.arcanas().map_err(|e| e.to_string())?;
    println!("  Arcanas:");
    for arcana in &arcanas {
        println!("  {}. {}", arcana.id, arcana.name);
    }

    let text = "Enter an arcana id to see its personas (or press Enter to go back): ";
    let Some(input) = prompt(reader, line, text)? else {
        return Ok(());
    };
    if input.is_empty() {
        return Ok(());
    }
    let Ok(id) = input.parse::<i64>() else {
        println!("  {}", Rejection::InvalidSelection.to_string().yellow());
        return Ok(());
    };

    let personas = session
        .personas_for_arcana(ArcanaId(id))
        .map_err(|e| e.to_string())?;
    if personas.is_empty() {
        println!("  No personas for that arcana.");
    } else {
        for persona in &personas {
            println!("  - {persona}");
        }
    }
    Ok(())
}

fn summon(session: &mut GameSession) -> Result<(), String> {
    match session.summon().map_err(|e| e.to_string())? {
        Outcome::Done(persona) => {
            println!("  You have summoned {}!", persona.name.bold());
            println!("  Your level is now {}.", session.player().level);
        }
        Outcome::Rejected(reason) => println!("  {}", reason.to_string().yellow()),
    }
    Ok(())
}

fn release(
    reader: &mut impl BufRead,
    line: &mut String,
    session: &mut GameSession,
) -> Result<(), String> {
    view_stock(session)?;
    let Some(target) = select_by_number(reader, line, session, "Persona number to release: ")?
    else {
        return Ok(());
    };

    match session.release(target.persona_id).map_err(|e| e.to_string())? {
        Outcome::Done(persona) => println!("  You have released {}!", persona.name.bold()),
        Outcome::Rejected(reason) => println!("  {}", reason.to_string().yellow()),
    }
    Ok(())
}

fn fuse(
    reader: &mut impl BufRead,
    line: &mut String,
    session: &mut GameSession,
) -> Result<(), String> {
    view_stock(session)?;
    let Some(first) = select_by_number(reader, line, session, "First persona number: ")? else {
        return Ok(());
    };
    let Some(second) = select_by_number(reader, line, session, "Second persona number: ")? else {
        return Ok(());
    };

    match session
        .fuse(first.persona_id, second.persona_id)
        .map_err(|e| e.to_string())?
    {
        Outcome::Done(persona) => {
            println!(
                "  {} and {} fused into {}!",
                first.name,
                second.name,
                persona.name.bold()
            );
            println!("  Your level is now {}.", session.player().level);
        }
        Outcome::Rejected(reason) => println!("  {}", reason.to_string().yellow()),
    }
    Ok(())
}

/// Prompt for a 1-based stock position and translate it to an entry.
/// `None` on EOF or an invalid selection (already reported).
fn select_by_number(
    reader: &mut impl BufRead,
    line: &mut String,
    session: &GameSession,
    text: &str,
) -> Result<Option<velvet_core::StockEntry>, String> {
    let Some(input) = prompt(reader, line, text)? else {
        return Ok(None);
    };
    let Ok(number) = input.parse::<usize>() else {
        println!("  {}", Rejection::InvalidSelection.to_string().yellow());
        return Ok(None);
    };
    match session
        .stock_entry_by_number(number)
        .map_err(|e| e.to_string())?
    {
        Some(entry) => Ok(Some(entry)),
        None => {
            println!("  {}", Rejection::InvalidSelection.to_string().yellow());
            Ok(None)
        }
    }
}
