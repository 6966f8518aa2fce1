pub const OWNER_NAME: &str = "Rowan Ellis";
pub const HEADLINE: &str = "Systems engineer working on graphics runtimes and developer tooling.";
pub const GREETING: &str = "WELCOME TO MY CORNER OF THE WEB";
pub const CALENDAR_URL: &str = "https://cal.com/rowan-ellis/intro";
pub const THREE_SCRIPT_URL: &str = "https://unpkg.com/three@0.150.1/build/three.min.js";

pub const ABOUT: &[&str] = &[
    "I build the parts of software people only notice when they break: render loops, asset pipelines, build systems and the tools that keep them honest.",
    "Lately that means WebAssembly front ends, GPU profiling and small languages for describing scenes. Outside of work I contribute to open source graphics tooling and write about what I learn.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconTreatment {
    Invert,
    Monochrome,
}

impl IconTreatment {
    pub fn class(self) -> &'static str {
        match self {
            Self::Invert => "icon-invert",
            Self::Monochrome => "icon-mono",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub proficiency: f32,
    pub icon_url: &'static str,
    pub treatment: Option<IconTreatment>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub role: &'static str,
    pub organization: &'static str,
    pub location: &'static str,
    pub period: &'static str,
    pub highlights: &'static [&'static str],
    pub stack: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicationLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Publication {
    pub title: &'static str,
    pub venue: &'static str,
    pub year: u16,
    pub blurb: &'static str,
    pub links: &'static [PublicationLink],
    pub tags: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Lumen Trace",
        description: "Frame capture viewer for WebGPU applications with per-pass timing and resource diffing.",
        tags: &["Rust", "WebGPU", "wasm-bindgen"],
    },
    Project {
        title: "Quillmark",
        description: "Incremental markdown compiler that rebuilds only the documents touched by an edit.",
        tags: &["Rust", "Salsa", "CLI"],
    },
    Project {
        title: "Tidewatch",
        description: "Coastal sensor dashboard streaming buoy telemetry over MQTT into a time-series store.",
        tags: &["TypeScript", "MQTT", "TimescaleDB"],
    },
    Project {
        title: "Pebble VM",
        description: "Register-based bytecode VM for a tiny scripting language, with a tracing garbage collector.",
        tags: &["C", "Interpreters", "GC"],
    },
    Project {
        title: "Atlas Packer",
        description: "Texture atlas packer using skyline bin packing, shipped as a build-time asset step.",
        tags: &["Rust", "Image processing"],
    },
    Project {
        title: "Hearth",
        description: "Self-hosted home automation hub with a declarative rule engine and offline-first mobile app.",
        tags: &["Go", "SQLite", "Flutter"],
    },
];

pub const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        role: "Senior Software Engineer, Rendering",
        organization: "Northlight Studios",
        location: "Remote",
        period: "2022 – Present",
        highlights: &[
            "Led the migration of the editor viewport from WebGL to WebGPU, cutting frame time by 38%.",
            "Built a GPU timing overlay used by every gameplay team for performance triage.",
            "Mentored four engineers through their first shader and engine contributions.",
        ],
        stack: &["Rust", "WebGPU", "TypeScript", "WGSL"],
    },
    ExperienceEntry {
        role: "Software Engineer, Developer Tools",
        organization: "Fathom Labs",
        location: "Toronto, ON",
        period: "2019 – 2022",
        highlights: &[
            "Designed the incremental build cache that brought CI times from 40 to 9 minutes.",
            "Maintained the internal language server for a domain-specific configuration language.",
        ],
        stack: &["Rust", "Bazel", "LSP", "PostgreSQL"],
    },
    ExperienceEntry {
        role: "Graduate Research Assistant",
        organization: "University of Waterloo",
        location: "Waterloo, ON",
        period: "2017 – 2019",
        highlights: &[
            "Researched level-of-detail selection for point cloud rendering on mobile hardware.",
            "Published two papers on perceptual error metrics for streamed geometry.",
        ],
        stack: &["C++", "OpenGL ES", "Python"],
    },
];

pub const PUBLICATIONS: &[Publication] = &[
    Publication {
        title: "Perceptual Budgets for Streamed Point Clouds",
        venue: "Graphics Interface",
        year: 2019,
        blurb: "A screen-space error metric that lets mobile clients pick point cloud detail levels under a fixed frame budget.",
        links: &[
            PublicationLink {
                label: "Paper",
                href: "https://example.org/papers/perceptual-budgets.pdf",
            },
            PublicationLink {
                label: "Talk",
                href: "https://example.org/talks/perceptual-budgets",
            },
        ],
        tags: &["Rendering", "Mobile", "LOD"],
    },
    Publication {
        title: "Predictive Prefetching for Out-of-Core Geometry",
        venue: "Eurographics Short Papers",
        year: 2018,
        blurb: "Camera-path prediction to prefetch geometry chunks before they enter the view frustum.",
        links: &[PublicationLink {
            label: "Paper",
            href: "https://example.org/papers/predictive-prefetching.pdf",
        }],
        tags: &["Streaming", "Caching"],
    },
    Publication {
        title: "Notes on Shipping Rust to the Browser",
        venue: "RustConf Lightning Talks",
        year: 2023,
        blurb: "Practical lessons on binary size, panics and JavaScript interop from two years of production WebAssembly.",
        links: &[
            PublicationLink {
                label: "Slides",
                href: "https://example.org/talks/rust-browser-slides",
            },
            PublicationLink {
                label: "Video",
                href: "https://example.org/talks/rust-browser-video",
            },
        ],
        tags: &["Rust", "WebAssembly"],
    },
];

macro_rules! devicon {
    ($name:literal, $file:literal) => {
        concat!(
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/",
            $name,
            "/",
            $file
        )
    };
}

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "Rust",
        proficiency: 0.95,
        icon_url: devicon!("rust", "rust-original.svg"),
        treatment: Some(IconTreatment::Invert),
    },
    Skill {
        name: "TypeScript",
        proficiency: 0.85,
        icon_url: devicon!("typescript", "typescript-original.svg"),
        treatment: None,
    },
    Skill {
        name: "C++",
        proficiency: 0.8,
        icon_url: devicon!("cplusplus", "cplusplus-original.svg"),
        treatment: None,
    },
    Skill {
        name: "WebAssembly",
        proficiency: 0.85,
        icon_url: devicon!("wasm", "wasm-original.svg"),
        treatment: None,
    },
    Skill {
        name: "OpenGL",
        proficiency: 0.75,
        icon_url: devicon!("opengl", "opengl-original.svg"),
        treatment: Some(IconTreatment::Monochrome),
    },
    Skill {
        name: "Python",
        proficiency: 0.7,
        icon_url: devicon!("python", "python-original.svg"),
        treatment: None,
    },
    Skill {
        name: "PostgreSQL",
        proficiency: 0.65,
        icon_url: devicon!("postgresql", "postgresql-original.svg"),
        treatment: None,
    },
    Skill {
        name: "GitHub Actions",
        proficiency: 0.7,
        icon_url: devicon!("githubactions", "githubactions-original.svg"),
        treatment: None,
    },
];

pub fn skill_percent(skill: &Skill) -> u8 {
    (skill.proficiency.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

    #[test]
    fn skill_icons_point_at_devicon_cdn() {
        for skill in SKILLS {
            assert!(skill.icon_url.starts_with(DEVICON), "{}", skill.name);
        }
    }

    #[test]
    fn skill_percent_is_clamped() {
        let over = Skill {
            name: "Over",
            proficiency: 1.4,
            icon_url: "",
            treatment: None,
        };
        assert_eq!(skill_percent(&over), 100);
        assert_eq!(skill_percent(&SKILLS[0]), 95);
    }

    #[test]
    fn every_project_has_tags() {
        assert!(PROJECTS.len() >= 4);
        assert!(PROJECTS.iter().all(|project| !project.tags.is_empty()));
    }
}
