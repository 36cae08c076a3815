use crate::infra::InMemoryListingRepository;
use clap::Args;
use std::sync::Arc;

use estate_desk::config::AppConfig;
use estate_desk::error::AppError;
use estate_desk::workflows::chat::ChatLog;
use estate_desk::workflows::listings::{
    catalog_csv, CatalogFilter, ListingDraft, ListingService, ModerationVerdict,
};
use estate_desk::workflows::sessions::AccessPolicy;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Agent access code used to open the demo agent session
    #[arg(long, default_value = "4452")]
    pub(crate) agent_code: String,
    /// Manager access code used to open the demo manager session
    #[arg(long, default_value = "000")]
    pub(crate) manager_code: String,
    /// Skip the chat portion of the demo output
    #[arg(long)]
    pub(crate) skip_chat: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let policy = AccessPolicy::from_config(&config.sessions);

    println!("Listing platform demo");

    let agent = match policy.agent_session(&args.agent_code) {
        Ok(session) => session,
        Err(err) => {
            println!("  Agent login rejected: {err}");
            return Ok(());
        }
    };
    println!("- Agent session opened for {}", agent.principal);

    let repository = Arc::new(InMemoryListingRepository::default());
    let service = ListingService::new(repository);

    let villa = match service.submit(demo_villa_draft(), &agent.principal) {
        Ok(listing) => listing,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Submitted {} '{}' -> status {}",
        villa.id.0,
        villa.title,
        villa.status.label()
    );

    let apartment = match service.submit(demo_apartment_draft(), &agent.principal) {
        Ok(listing) => listing,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Submitted {} '{}' -> status {}",
        apartment.id.0,
        apartment.title,
        apartment.status.label()
    );

    let mut incomplete = demo_apartment_draft();
    incomplete.price = String::new();
    if let Err(err) = service.submit(incomplete, &agent.principal) {
        println!("- Incomplete draft turned away: {err}");
    }

    let manager = match policy.manager_session(&args.manager_code) {
        Ok(session) => session,
        Err(err) => {
            println!("  Manager login rejected: {err}");
            return Ok(());
        }
    };
    println!("- Manager session opened for {}", manager.principal);

    match service.moderation_queue() {
        Ok(queue) => println!("- Moderation queue holds {} listing(s)", queue.len()),
        Err(err) => println!("  Queue unavailable: {err}"),
    }

    if let Err(err) = service.moderate(&villa.id, ModerationVerdict::Approved, manager.role) {
        println!("  Moderation failed: {err}");
        return Ok(());
    }
    println!("- {} approved", villa.id.0);

    if let Err(err) = service.moderate(&apartment.id, ModerationVerdict::Revision, manager.role) {
        println!("  Moderation failed: {err}");
        return Ok(());
    }
    println!("- {} sent back for revision", apartment.id.0);

    let mut corrected = demo_apartment_draft();
    corrected.price = "325 000 €".to_string();
    match service.resubmit(&apartment.id, corrected, &agent.principal) {
        Ok(listing) => println!(
            "- {} resubmitted at {} -> status {}",
            listing.id.0,
            listing.price,
            listing.status.label()
        ),
        Err(err) => {
            println!("  Resubmission failed: {err}");
            return Ok(());
        }
    }

    if let Err(err) = service.moderate(&apartment.id, ModerationVerdict::Approved, manager.role) {
        println!("  Moderation failed: {err}");
        return Ok(());
    }
    println!("- {} approved after revision", apartment.id.0);

    match service.listings_for_agent(&agent.principal) {
        Ok(mine) => {
            println!("\nAgent portfolio");
            for listing in mine {
                println!(
                    "- {} '{}' ({}, {}) -> {}",
                    listing.id.0,
                    listing.title,
                    listing.city,
                    listing.price,
                    listing.status.label()
                );
            }
        }
        Err(err) => println!("  Portfolio unavailable: {err}"),
    }

    let filter = CatalogFilter {
        city: Some("Limassol".to_string()),
        ..CatalogFilter::default()
    };
    match (
        service.catalog(&CatalogFilter::default()),
        service.catalog(&filter),
    ) {
        (Ok(all), Ok(limassol)) => {
            println!("\nPublic catalog: {} listing(s) approved", all.len());
            for card in &all {
                println!("- {} '{}' in {}, {}", card.id.0, card.title, card.city, card.district);
            }
            println!("Filtered by city=Limassol: {} listing(s)", limassol.len());

            match catalog_csv(&all) {
                Ok(csv) => println!("\nCatalog export\n{csv}"),
                Err(err) => println!("  Export unavailable: {err}"),
            }
        }
        _ => println!("  Catalog unavailable"),
    }

    if args.skip_chat {
        return Ok(());
    }

    println!("Chat thread");
    let chat = ChatLog::default();
    if chat
        .post(
            &agent.principal,
            &manager.principal,
            manager.role,
            "Welcome! How are the new listings coming along?",
        )
        .is_ok()
    {
        let _ = chat.post(
            &agent.principal,
            &agent.principal,
            agent.role,
            "The villa is live and the apartment is back in review.",
        );
    }
    for message in chat.thread(&agent.principal) {
        println!("- [{}] {}: {}", message.sent_at.to_rfc3339(), message.author, message.body);
    }

    Ok(())
}

fn demo_villa_draft() -> ListingDraft {
    ListingDraft {
        title: "Seaside villa with panoramic views".to_string(),
        price: "2 500 000 €".to_string(),
        description: "Modern villa with a private pool and garden.".to_string(),
        location_url: Some("https://maps.example.com/villa-paphos".to_string()),
        city: "Paphos".to_string(),
        district: "Coral Bay".to_string(),
        rooms: "4".to_string(),
        view: "sea".to_string(),
        property_type: "villa".to_string(),
        pool: "private".to_string(),
        photos: vec!["photos/villa-front.jpg".to_string()],
    }
}

fn demo_apartment_draft() -> ListingDraft {
    ListingDraft {
        title: "Two-room apartment near the marina".to_string(),
        price: "340 000 €".to_string(),
        description: "Walking distance to the seafront.".to_string(),
        location_url: None,
        city: "Limassol".to_string(),
        district: "Marina".to_string(),
        rooms: "2".to_string(),
        view: "city".to_string(),
        property_type: "apartment".to_string(),
        pool: "shared".to_string(),
        photos: vec!["photos/marina-living-room.jpg".to_string()],
    }
}
