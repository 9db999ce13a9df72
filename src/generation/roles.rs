use serde::Deserialize;

/// Persona a model is asked to adopt for one step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleConfig {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl RoleConfig {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}.\n{}\n\nYour goal: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// Task template; `{key}` placeholders are filled from the step inputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    #[serde(default)]
    pub expected_output: String,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// One step as written in a crew file: role fields and task fields side by side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewStep {
    #[serde(flatten)]
    pub role: RoleConfig,
    #[serde(flatten)]
    pub task: TaskSpec,
}

/// Ordered steps run sequentially for one pipeline call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewSpec {
    pub name: &'static str,
    pub steps: Vec<CrewStep>,
}

const DESIGN_TASK: &str = r#"Design the curriculum for an online video course.

Course title: {course_title}
Subtitle: {course_subtitle}
Main goal: {course_goal}
Target audience: {target_audience}
Key promises from the course description:
{description_points}

Organise the course into 4 to 8 sections with 3 to 6 lectures each. Write the
outline in Markdown using exactly this shape:

# <Course Title>
## Section 1. <Section Title>
### 1. <Lecture Title>
- Objective: <what the student can do afterwards>
- Activity: <hands-on exercise or demo>

After the outline, repeat the same curriculum as a fenced ```json block with
the schema {"title": string, "sections": [{"title": string, "lectures":
[{"title": string, "objective": string, "activity": string}]}]}. Section and
lecture titles in the JSON must not carry numbering."#;

const WRITE_TASK: &str = r#"Write the full script for the lecture "{lecture_title}" in the
section "{section_description}" of the course "{course_title}".

Lecture objective: {lecture_objective}
Planned activity: {lecture_activity}
Audience: {audience_level}
Sections already covered: {previous_sections}

Explain concepts from first principles, include runnable code examples where
they help, and finish with a short recap. Do not repeat material from the
sections already covered."#;

const REVIEW_TASK: &str = r#"Review the draft lecture "{lecture_title}" written for: {audience_level}.

Draft:
{previous_output}

Fix technical mistakes, tighten the wording, make sure the objective
"{lecture_objective}" is fully met, and return the complete corrected lecture."#;

const SLIDES_TASK: &str = r##"Create a slide deck for the lecture "{lecture_title}" from the section
"{section_description}".

Lecture objective: {lecture_objective}
Audience: {audience_level}

Lecture content:
{lecture_content}

Produce 8 to 15 slides. Start each slide with "# [Slide N] <Title>", separate
slides with a line containing only "---", and prefer short bullet points and
small code snippets over paragraphs. Begin with a title slide and end with a
summary slide."##;

impl CrewSpec {
    /// Single curriculum designer producing the Markdown outline plus JSON.
    pub fn course_design() -> Self {
        Self {
            name: "course design",
            steps: vec![CrewStep {
                role: RoleConfig::new(
                    "an expert online course curriculum designer",
                    "Design a logically ordered, practical curriculum that takes the target audience to the course goal",
                    "You have structured dozens of best-selling technical courses and know how to pace material from fundamentals to real projects.",
                ),
                task: TaskSpec::new(
                    DESIGN_TASK,
                    "A Markdown curriculum outline followed by the same curriculum as a fenced json block",
                ),
            }],
        }
    }

    /// Writer drafts the lecture, reviewer returns the corrected version.
    pub fn lecture_content() -> Self {
        Self {
            name: "lecture content",
            steps: vec![
                CrewStep {
                    role: RoleConfig::new(
                        "a senior technical instructor and content writer",
                        "Write clear, engaging and accurate lecture scripts",
                        "You turn complex topics into approachable lessons with concrete examples.",
                    ),
                    task: TaskSpec::new(WRITE_TASK, "The complete lecture script in Markdown"),
                },
                CrewStep {
                    role: RoleConfig::new(
                        "a meticulous technical editor",
                        "Make every lecture correct, consistent and easy to follow",
                        "You review course material for accuracy and clarity before it is recorded.",
                    ),
                    task: TaskSpec::new(
                        REVIEW_TASK,
                        "The final reviewed lecture script in Markdown",
                    ),
                },
            ],
        }
    }

    pub fn slides() -> Self {
        Self {
            name: "slides",
            steps: vec![CrewStep {
                role: RoleConfig::new(
                    "a presentation designer for technical courses",
                    "Condense lecture scripts into clear, well-paced slide decks",
                    "You design slides that support a spoken lecture rather than repeat it.",
                ),
                task: TaskSpec::new(SLIDES_TASK, "A Markdown slide deck"),
            }],
        }
    }
}
