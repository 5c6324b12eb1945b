use colored::Colorize;
use std::io::{self, Write};

use crate::compiler::{CompilePlan, Role, Source};
use crate::gateway::SubmitReceipt;
use crate::payload::Manifest;

fn role_tag(role: Role) -> colored::ColoredString {
    match role {
        Role::Subject => "[SUBJECT]".green().bold(),
        Role::Base => "[BASE]".yellow().bold(),
        Role::Topper | Role::LugeTopper => "[TOPPER]".yellow().bold(),
        Role::Logo => "[LOGO]".magenta().bold(),
        Role::Reference => "[REFERENCE]".cyan().bold(),
        Role::Chat => "[CHAT]".blue().bold(),
    }
}

/// Dry-run view: what would be attached, before any fetch.
pub fn show_plan(plan: &CompilePlan) {
    println!("\n=== PLAN ===");
    if plan.attachments.is_empty() {
        println!("(no attachments)");
    }
    for (i, a) in plan.attachments.iter().enumerate() {
        let from = match &a.source {
            Source::Ready(f) => format!("{} ({} bytes)", f.name, f.len()),
            Source::Remote { url, .. } => format!("{} {}", "fetch".dimmed(), url),
        };
        println!("{}. {}  {}", i + 1, role_tag(a.role), from);
        println!("   {}", a.instruction.dimmed());
    }
    println!("\n{}", "Prompt:".bold());
    println!("{}\n", plan.prompt());
}

pub fn show_payload(manifest: &Manifest) {
    println!("\n=== PAYLOAD {} ===", manifest.run_id.to_string().bold());
    if manifest.files.is_empty() {
        println!("(no images attached)");
    }
    for f in &manifest.files {
        println!("{}. {} {} ({}, {} bytes)", f.index, "[IMAGE]".green().bold(), f.name, f.mime, f.bytes);
        println!("   {}", f.instruction.dimmed());
    }
    println!("\n{}", "Prompt:".bold());
    println!("{}\n", manifest.prompt);
}

pub fn show_receipt(receipt: &SubmitReceipt) {
    println!("{} status {}", "Submitted.".green().bold(), receipt.status);
    match serde_json::to_string_pretty(&receipt.body) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{}", receipt.body),
    }
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}
