use yew::prelude::*;

use crate::content::{skill_percent, ABOUT, EXPERIENCE, PUBLICATIONS, SKILLS};
use crate::sections::SectionId;

#[derive(Properties, PartialEq)]
pub(super) struct ExternalLinkProps {
    pub href: AttrValue,
    pub label: AttrValue,
}

#[function_component(ExternalLink)]
pub(super) fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a class="link" href={props.href.clone()} target="_blank" rel="noopener noreferrer">
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

fn tag_list(tags: &[&'static str]) -> Html {
    html! {
        <ul class="tag-list">
            { for tags.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
        </ul>
    }
}

pub(super) fn section_heading(section: SectionId) -> Html {
    html! {
        <h2 id={format!("{}-heading", section.anchor())} class="section-title">
            {section.label()}
        </h2>
    }
}

#[function_component(AboutSection)]
pub(super) fn about_section() -> Html {
    let section = SectionId::About;
    html! {
        <section
            id={section.anchor()}
            class="section-block"
            aria-labelledby={format!("{}-heading", section.anchor())}
        >
            { section_heading(section) }
            { for ABOUT.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
        </section>
    }
}

#[function_component(ExperienceSection)]
pub(super) fn experience_section() -> Html {
    let section = SectionId::Experience;
    html! {
        <section
            id={section.anchor()}
            class="section-block"
            aria-labelledby={format!("{}-heading", section.anchor())}
        >
            { section_heading(section) }
            <ol class="timeline">
                { for EXPERIENCE.iter().map(|entry| html! {
                    <li class="timeline-entry">
                        <div class="timeline-meta">
                            <span class="muted">{entry.period}</span>
                            <span class="muted">{entry.location}</span>
                        </div>
                        <h3>{entry.role}</h3>
                        <p class="timeline-org">{entry.organization}</p>
                        <ul class="row-list">
                            { for entry.highlights.iter().map(|line| html! { <li>{*line}</li> }) }
                        </ul>
                        { tag_list(entry.stack) }
                    </li>
                }) }
            </ol>
        </section>
    }
}

#[function_component(PublicationsSection)]
pub(super) fn publications_section() -> Html {
    let section = SectionId::Publications;
    html! {
        <section
            id={section.anchor()}
            class="section-block"
            aria-labelledby={format!("{}-heading", section.anchor())}
        >
            { section_heading(section) }
            <div class="publication-list">
                { for PUBLICATIONS.iter().map(|publication| html! {
                    <article class="publication">
                        <p class="muted">{format!("{} · {}", publication.venue, publication.year)}</p>
                        <h3>{publication.title}</h3>
                        <p>{publication.blurb}</p>
                        <div class="publication-links">
                            { for publication.links.iter().map(|link| html! {
                                <ExternalLink href={link.href} label={link.label} />
                            }) }
                        </div>
                        { tag_list(publication.tags) }
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
pub(super) fn skills_section() -> Html {
    let section = SectionId::Skills;
    html! {
        <section
            id={section.anchor()}
            class="section-block"
            aria-labelledby={format!("{}-heading", section.anchor())}
        >
            { section_heading(section) }
            <ul class="skill-grid">
                { for SKILLS.iter().map(|skill| {
                    let percent = skill_percent(skill);
                    html! {
                        <li class="skill">
                            <img
                                class={classes!("skill-icon", skill.treatment.map(|t| t.class()))}
                                src={skill.icon_url}
                                alt=""
                                loading="lazy"
                            />
                            <span class="skill-name">{skill.name}</span>
                            <div
                                class="skill-meter"
                                role="meter"
                                aria-label={format!("{} proficiency", skill.name)}
                                aria-valuemin="0"
                                aria-valuemax="100"
                                aria-valuenow={percent.to_string()}
                            >
                                <div class="skill-meter-fill" style={format!("width: {percent}%;")}></div>
                            </div>
                        </li>
                    }
                }) }
            </ul>
        </section>
    }
}
