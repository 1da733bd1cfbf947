use folio_api::RepositorySummary;
use folio_config::{SanitizedConfig, resolve_social_link};
use folio_sync::Profile;

/// Prints the loaded portfolio. Sections with no content are skipped, the
/// same way the config sanitizer left them empty.
pub(crate) fn render_portfolio(
    config: &SanitizedConfig,
    profile: &Profile,
    projects: &[RepositorySummary],
) {
    render_header(config, profile);

    if config.projects.github.display {
        section(&config.projects.github.header);
        if projects.is_empty() {
            println!("  (no repositories found)");
        }
        for repo in projects {
            let stars = format!("{} stars", repo.stargazers_count);
            match (&repo.language, &repo.description) {
                (Some(language), Some(description)) => {
                    println!("  {} [{}] ({})", repo.full_name, language, stars);
                    println!("      {description}");
                }
                (Some(language), None) => {
                    println!("  {} [{}] ({})", repo.full_name, language, stars)
                }
                (None, Some(description)) => {
                    println!("  {} ({})", repo.full_name, stars);
                    println!("      {description}");
                }
                (None, None) => println!("  {} ({})", repo.full_name, stars),
            }
        }
    }

    if !config.projects.external.is_empty() {
        section("External Projects");
        for project in &config.projects.external {
            println!("  {}", project.title);
            if !project.description.is_empty() {
                println!("      {}", project.description);
            }
            if !project.link.is_empty() {
                println!("      {}", project.link);
            }
        }
    }

    if !config.skills.is_empty() {
        section("Skills");
        println!("  {}", config.skills.join(", "));
    }

    if !config.experiences.is_empty() {
        section("Experience");
        for experience in &config.experiences {
            println!(
                "  {} at {} ({} - {})",
                experience.position, experience.company, experience.from, experience.to
            );
            for line in &experience.description {
                println!("      - {line}");
            }
        }
    }

    if !config.educations.is_empty() {
        section("Education");
        for education in &config.educations {
            println!(
                "  {}, {} ({} - {})",
                education.degree, education.institution, education.from, education.to
            );
            if !education.summary.is_empty() {
                println!("      {}", education.summary);
            }
        }
    }

    if !config.certifications.is_empty() {
        section("Certifications");
        for certification in &config.certifications {
            println!(
                "  {} - {} ({})",
                certification.name, certification.organization, certification.year
            );
        }
    }

    if !config.publications.is_empty() {
        section("Publications");
        for publication in &config.publications {
            let venue = if publication.journal_name.is_empty() {
                &publication.conference_name
            } else {
                &publication.journal_name
            };
            println!("  {} ({})", publication.title, venue);
            if !publication.authors.is_empty() {
                println!("      {}", publication.authors);
            }
        }
    }

    if !config.testimonials.is_empty() {
        section("Testimonials");
        for testimonial in &config.testimonials {
            println!("  \"{}\"", testimonial.quote);
            println!("      - {}, {}", testimonial.name, testimonial.title);
        }
    }

    if !config.footer.is_empty() {
        println!();
        println!("{}", config.footer);
    }
}

fn render_header(config: &SanitizedConfig, profile: &Profile) {
    let name = profile.name.trim();
    if name.is_empty() {
        println!("{}", config.github.username);
    } else {
        println!("{} (@{})", name, config.github.username);
    }

    if !profile.bio.is_empty() {
        println!("{}", profile.bio);
    }

    match (profile.location.is_empty(), profile.company.is_empty()) {
        (false, false) => println!("{} | {}", profile.location, profile.company),
        (false, true) => println!("{}", profile.location),
        (true, false) => println!("{}", profile.company),
        (true, true) => {}
    }

    for (key, handle) in &config.social {
        if handle.is_empty() {
            continue;
        }
        let link = resolve_social_link(key, handle);
        println!("{}: {}", link.label, link.target);
    }
}

fn section(title: &str) {
    println!();
    println!("## {title}");
}
