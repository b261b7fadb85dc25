//! Person commands

use clap::{Args, Subcommand};

use crate::output::{format_people, OutputFormat};
use crate::{AppContext, Cli};
use kinroots_core::{Error, Gender, Person, PersonId};
use kinroots_translate::{DuplicateResolver, GeminiClassifier};

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a new family member
    Add {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Gender: male, female, other
        #[arg(short, long)]
        gender: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Middle name
        #[arg(long)]
        middle_name: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
        /// Father's id
        #[arg(long)]
        father: Option<String>,
        /// Mother's id
        #[arg(long)]
        mother: Option<String>,
        /// Spouse's id
        #[arg(long)]
        spouse: Option<String>,
        /// Current location
        #[arg(long)]
        location: Option<String>,
        /// Profession
        #[arg(long)]
        profession: Option<String>,
        /// Mark as deceased
        #[arg(long)]
        deceased: bool,
        /// Check for duplicate records before saving (needs GEMINI_API_KEY)
        #[arg(long)]
        dedupe: bool,
    },
    /// List all family members
    List,
    /// Show one family member
    Show {
        /// Person id
        id: String,
    },
    /// Set family references on an existing member
    Link {
        /// Person id
        id: String,
        /// Father's id
        #[arg(long)]
        father: Option<String>,
        /// Mother's id
        #[arg(long)]
        mother: Option<String>,
        /// Spouse's id
        #[arg(long)]
        spouse: Option<String>,
    },
    /// Remove a family member
    Remove {
        /// Person id
        id: String,
    },
}

pub async fn run(args: &PersonArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        PersonCommands::Add {
            first_name,
            last_name,
            gender,
            id,
            middle_name,
            dob,
            father,
            mother,
            spouse,
            location,
            profession,
            deceased,
            dedupe,
        } => {
            let gender: Gender = gender.parse()?;
            let mut person = Person::new(first_name, last_name, gender);

            if let Some(id) = id {
                person = person.with_id(id.as_str());
            }
            person.middle_name = middle_name.clone();
            if let Some(dob) = dob {
                person.dob = Some(dob.parse()?);
            }
            person.father_id = father.as_deref().map(PersonId::from);
            person.mother_id = mother.as_deref().map(PersonId::from);
            person.spouse_id = spouse.as_deref().map(PersonId::from);
            person.current_location = location.clone();
            person.profession = profession.clone();
            person.is_living = !*deceased;

            let mut lineage = ctx.store.load_lineage().await?;

            if *dedupe {
                match std::env::var("GEMINI_API_KEY") {
                    Ok(key) => {
                        let mut classifier = GeminiClassifier::new(key)?;
                        if let Some(model) = &ctx.config.gemini_model {
                            classifier = classifier.with_model(model);
                        }
                        let resolver = DuplicateResolver::new(classifier);
                        if let Some((existing, confidence)) =
                            resolver.resolve(&person, &lineage).await
                        {
                            println!(
                                "Possible duplicate of {} [{}] (confidence {:.0}). Record not saved; re-run without --dedupe to add anyway.",
                                existing.full_name(),
                                existing.id,
                                confidence
                            );
                            return Ok(());
                        }
                    }
                    Err(_) => {
                        println!("Skipping duplicate check: GEMINI_API_KEY not set");
                    }
                }
            }

            let name = person.full_name();
            let id = person.id.clone();
            lineage.upsert(person);
            ctx.store.save_lineage(&lineage).await?;

            tracing::info!("Added person: {} [{}]", name, id);
            println!("Added {} [{}]", name, id);
        }
        PersonCommands::List => {
            let lineage = ctx.store.load_lineage().await?;
            if lineage.is_empty() {
                println!("No family members recorded yet");
            } else {
                println!("Family members ({} recorded):", lineage.len());
                println!(
                    "{}",
                    format_people(&lineage.people, OutputFormat::from(cli.format.as_str()))
                );
            }
        }
        PersonCommands::Show { id } => {
            let lineage = ctx.store.load_lineage().await?;
            let person = lineage
                .find(&id.as_str().into())
                .ok_or_else(|| Error::PersonNotFound(id.clone()))?;

            println!("{}", crate::output::person_line(person));
            if let Some(father_id) = &person.father_id {
                println!("  father: {}", reference_line(&lineage, father_id));
            }
            if let Some(mother_id) = &person.mother_id {
                println!("  mother: {}", reference_line(&lineage, mother_id));
            }
            if let Some(spouse_id) = &person.spouse_id {
                println!("  spouse: {}", reference_line(&lineage, spouse_id));
            }
            if let Some(bio) = &person.bio {
                println!("  bio: {}", bio);
            }
        }
        PersonCommands::Link {
            id,
            father,
            mother,
            spouse,
        } => {
            let mut lineage = ctx.store.load_lineage().await?;
            let mut person = lineage
                .find(&id.as_str().into())
                .cloned()
                .ok_or_else(|| Error::PersonNotFound(id.clone()))?;

            for target in [father, mother, spouse].into_iter().flatten() {
                if !lineage.contains(&target.as_str().into()) {
                    return Err(Error::PersonNotFound(target.clone()).into());
                }
            }

            if let Some(father) = father {
                person.father_id = Some(father.as_str().into());
            }
            if let Some(mother) = mother {
                person.mother_id = Some(mother.as_str().into());
            }
            if let Some(spouse) = spouse {
                person.spouse_id = Some(spouse.as_str().into());
            }

            let name = person.full_name();
            lineage.upsert(person);
            ctx.store.save_lineage(&lineage).await?;

            tracing::info!("Updated family links for {}", id);
            println!("Updated family links for {} [{}]", name, id);
        }
        PersonCommands::Remove { id } => {
            let mut lineage = ctx.store.load_lineage().await?;
            if lineage.remove(&id.as_str().into()) {
                ctx.store.save_lineage(&lineage).await?;
                println!("Removed {}", id);
            } else {
                println!("No person with id '{}'", id);
            }
        }
    }

    Ok(())
}

fn reference_line(lineage: &kinroots_core::Lineage, id: &PersonId) -> String {
    match lineage.find(id) {
        Some(person) => format!("{} [{}]", person.full_name(), person.id),
        None => format!("[{}] (no record)", id),
    }
}
