use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;
use tempfile::TempDir;

use crate::curriculum::{Curriculum, Lecture, Section};
use crate::generation::{
    ContentGenerator, CrewFile, CrewSpec, CrewStep, GenerationInputs, PREVIOUS_OUTPUT_KEY,
    RoleConfig, TaskSpec,
};
use crate::output::OutputLayout;

use super::context::{CourseContext, CourseEvent};
use super::error::PipelineError;
use super::stages::{CourseStage, SlideStage};
use super::types::{RunPhase, StageKind};
use super::*;

const OUTLINE: &str = "Here is your curriculum.

# Practical Rust
## Section 1. Foundations
### 1. Ownership
- Objective: understand moves
- Activity: fix borrow errors
### 2. Traits
- Objective: share behaviour
- Activity: implement Display
## Section 2. Async: Futures & Tasks
### 1. What is a Future?
- Objective: poll by hand
- Activity: write a timer
";

type Responder = dyn Fn(&str, &GenerationInputs) -> Result<String> + Send + Sync;

/// Answers each call through `respond(role, inputs)` and records it.
struct ScriptedGenerator {
    respond: Box<Responder>,
    calls: Mutex<Vec<(String, GenerationInputs)>>,
}

impl ScriptedGenerator {
    fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&str, &GenerationInputs) -> Result<String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls_for(&self, role: &str) -> Vec<GenerationInputs> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == role)
            .map(|(_, inputs)| inputs.clone())
            .collect()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        role: &RoleConfig,
        _task: &TaskSpec,
        inputs: &GenerationInputs,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((role.role.clone(), inputs.clone()));
        (self.respond)(&role.role, inputs)
    }
}

fn single(role: &str) -> CrewSpec {
    CrewSpec {
        name: "test",
        steps: vec![CrewStep {
            role: RoleConfig::new(role, "goal", "backstory"),
            task: TaskSpec::new("task", "output"),
        }],
    }
}

fn test_crews() -> CourseCrews {
    CourseCrews {
        design: single("designer"),
        content: single("writer"),
        slides: single("slides"),
    }
}

fn course_inputs() -> CourseInputs {
    CourseInputs {
        course_title: "Practical Rust".to_string(),
        course_subtitle: "Ship real tools".to_string(),
        description_points: vec!["Own your data".to_string(), "Go async".to_string()],
        target_audience: "Backend developers".to_string(),
        course_goal: "Write production Rust".to_string(),
    }
}

/// Designer returns `outline`; writer and slides echo the lecture title.
fn happy_responder(
    outline: &'static str,
) -> impl Fn(&str, &GenerationInputs) -> Result<String> + Send + Sync + 'static {
    move |role, inputs| match role {
        "designer" => Ok(outline.to_string()),
        "writer" => Ok(format!("# {}\n\nLecture body.", inputs["lecture_title"])),
        "slides" => Ok(format!(
            "# [Slide 1] {}\n---\nfrom: {}",
            inputs["lecture_title"],
            inputs["lecture_content"].lines().next().unwrap_or_default()
        )),
        other => bail!("unexpected role {other}"),
    }
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn sample_curriculum() -> Curriculum {
    Curriculum {
        title: "Practical Rust".to_string(),
        sections: vec![
            Section {
                title: "Foundations".to_string(),
                lectures: vec![
                    Lecture::new("Ownership", "understand moves", "fix borrow errors"),
                    Lecture::new("Traits", "share behaviour", "implement Display"),
                ],
            },
            Section {
                title: "Async: Futures & Tasks".to_string(),
                lectures: vec![Lecture::new("What is a Future?", "poll by hand", "write a timer")],
            },
        ],
    }
}

#[test]
fn pipeline_stages_run_in_fixed_order() {
    let generator = ScriptedGenerator::new(|_, _| Ok(String::new()));
    let pipeline = CoursePipeline::new(generator);
    assert_eq!(pipeline.stage_kinds(), StageKind::ORDER.to_vec());
}

#[test]
fn run_phases_advance_linearly() {
    let mut phase = RunPhase::Init;
    let mut visited = vec![phase];
    while let Some(next) = phase.next() {
        assert!(next > phase);
        phase = next;
        visited.push(phase);
    }
    assert_eq!(visited.len(), 5);
    assert_eq!(StageKind::Report.completes(), RunPhase::Reported);
}

#[tokio::test]
async fn full_run_writes_every_artifact() {
    let temp = TempDir::new().unwrap();
    let layout = OutputLayout::new(temp.path());
    let generator = ScriptedGenerator::new(happy_responder(OUTLINE));
    let pipeline = CoursePipeline::with_crews(generator.clone(), test_crews());

    let run = pipeline.run(course_inputs(), layout.clone()).await;

    match run.outcome {
        CourseOutcome::Completed(report) => assert_eq!(
            report,
            CourseReport {
                sections: 2,
                lectures: 3,
                lectures_written: 3,
                slides_written: 3,
            }
        ),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(run.phase, RunPhase::Reported);
    assert_eq!(run.state.curriculum(), Some(&sample_curriculum()));

    let curriculum_dir = layout.curriculum_dir();
    assert_eq!(read(curriculum_dir.join("course_curriculum_raw.md")), OUTLINE);
    let stored: Curriculum =
        serde_json::from_str(&read(curriculum_dir.join("course_curriculum.json"))).unwrap();
    assert_eq!(stored, sample_curriculum());

    let lecture = temp
        .path()
        .join("lectures/Async_Futures_&_Tasks/What_is_a_Future.md");
    assert_eq!(read(&lecture), "# What is a Future?\n\nLecture body.");
    let slides = temp
        .path()
        .join("slides/Async_Futures_&_Tasks/What_is_a_Future.md");
    assert_eq!(
        read(&slides),
        "# [Slide 1] What is a Future?\n---\nfrom: # What is a Future?"
    );
    assert!(temp.path().join("lectures/Foundations/Ownership.md").exists());
    assert!(temp.path().join("slides/Foundations/Traits.md").exists());
}

#[tokio::test]
async fn stages_receive_course_and_lecture_inputs() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(happy_responder(OUTLINE));
    let pipeline = CoursePipeline::with_crews(generator.clone(), test_crews());

    pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    let design = generator.calls_for("designer");
    assert_eq!(design.len(), 1);
    assert_eq!(design[0]["description_points"], "Own your data\nGo async");
    assert_eq!(design[0]["course_goal"], "Write production Rust");

    let writes = generator.calls_for("writer");
    let titles: Vec<&str> = writes
        .iter()
        .map(|inputs| inputs["lecture_title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Ownership", "Traits", "What is a Future?"]);
    assert_eq!(writes[0]["previous_sections"], "No previous sections.");
    assert_eq!(writes[2]["previous_sections"], "Foundations");
    assert_eq!(writes[1]["lecture_objective"], "share behaviour");
    assert_eq!(writes[1]["audience_level"], "Backend developers");

    let slides = generator.calls_for("slides");
    assert_eq!(slides.len(), 3);
    assert_eq!(slides[0]["lecture_content"], "# Ownership\n\nLecture body.");
}

#[tokio::test]
async fn json_block_bypasses_markdown_parsing() {
    const RESPONSE: &str = r#"# Draft outline
## Section 1. Draft section
### Draft lecture

```json
{"title": "From JSON", "sections": [{"title": "Only", "lectures": [{"title": "One", "objective": "o", "activity": "a"}]}]}
```"#;

    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(happy_responder(RESPONSE));
    let pipeline = CoursePipeline::with_crews(generator.clone(), test_crews());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    let curriculum = run.state.curriculum().expect("curriculum stored");
    assert_eq!(curriculum.title, "From JSON");
    assert_eq!(curriculum.sections[0].lectures[0], Lecture::new("One", "o", "a"));
    assert!(run.events.contains(&CourseEvent::CurriculumReady {
        source: "json",
        sections: 1,
        lectures: 1,
    }));
    assert!(temp.path().join("lectures/Only/One.md").exists());
}

#[tokio::test]
async fn design_failure_degrades_without_further_calls() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(happy_responder("I'm sorry, I can't design that."));
    let pipeline = CoursePipeline::with_crews(generator.clone(), test_crews());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    match &run.outcome {
        CourseOutcome::Degraded { reason } => assert!(reason.contains("no sections")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!run.outcome.is_failure());
    assert_eq!(run.phase, RunPhase::Reported);
    assert!(run.state.curriculum().is_none());
    assert!(generator.calls_for("writer").is_empty());
    assert!(generator.calls_for("slides").is_empty());

    assert!(temp.path().join("curriculum/course_curriculum_raw.md").exists());
    assert!(!temp.path().join("curriculum/course_curriculum.json").exists());
    assert!(run.events.contains(&CourseEvent::StageSkipped {
        stage: StageKind::Lectures,
        reason: "no curriculum available".to_string(),
    }));
    assert!(run.events.contains(&CourseEvent::Reported(None)));
}

#[tokio::test]
async fn empty_lecture_content_aborts_before_slides() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|role, inputs| match role {
        "designer" => Ok(OUTLINE.to_string()),
        "writer" if inputs["lecture_title"] == "Traits" => Ok("  \n\t".to_string()),
        "writer" => Ok("content".to_string()),
        _ => Ok("slides".to_string()),
    });
    let pipeline = CoursePipeline::with_crews(generator.clone(), test_crews());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    match run.outcome {
        CourseOutcome::Failed {
            stage,
            error:
                PipelineError::EmptyContent {
                    stage: error_stage,
                    section,
                    lecture,
                },
        } => {
            assert_eq!(stage, StageKind::Lectures);
            assert_eq!(error_stage, StageKind::Lectures);
            assert_eq!(section, "Foundations");
            assert_eq!(lecture, "Traits");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(run.phase, RunPhase::DesignedCurriculum);
    assert!(generator.calls_for("slides").is_empty());
    assert!(!temp.path().join("slides").exists());
    assert!(!run.events.contains(&CourseEvent::StageStarted(StageKind::Slides)));
}

#[tokio::test]
async fn generation_error_fails_the_design_stage() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|_, _| bail!("provider unavailable"));
    let pipeline = CoursePipeline::with_crews(generator, test_crews());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    match &run.outcome {
        CourseOutcome::Failed {
            stage: StageKind::Design,
            error: PipelineError::Generation { source, .. },
        } => assert!(format!("{source:#}").contains("provider unavailable")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(run.phase, RunPhase::Init);
    assert!(!temp.path().join("curriculum").exists());
}

#[tokio::test]
async fn empty_slides_abort_the_run() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|role, _| match role {
        "designer" => Ok(OUTLINE.to_string()),
        "writer" => Ok("content".to_string()),
        _ => Ok(String::new()),
    });
    let pipeline = CoursePipeline::with_crews(generator, test_crews());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    assert!(matches!(
        run.outcome,
        CourseOutcome::Failed {
            stage: StageKind::Slides,
            error: PipelineError::EmptyContent { .. },
        }
    ));
    assert_eq!(run.phase, RunPhase::LecturesWritten);
}

#[tokio::test]
async fn slide_stage_skips_missing_lecture_files() {
    let temp = TempDir::new().unwrap();
    let layout = OutputLayout::new(temp.path());
    let generator = ScriptedGenerator::new(happy_responder(OUTLINE));
    let stage = SlideStage::new(generator.clone(), single("slides"));

    let mut context = CourseContext::new(course_inputs(), layout.clone());
    context.record_curriculum(sample_curriculum(), "markdown");
    crate::output::write_file(layout.lecture_dir("Foundations"), "Traits.md", "# Traits").unwrap();

    stage.execute(&mut context).await.unwrap();

    assert_eq!(context.slides_written(), 1);
    let slides = generator.calls_for("slides");
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0]["lecture_title"], "Traits");
    assert!(context.events().contains(&CourseEvent::LectureMissing {
        path: layout.lecture_path("Foundations", "Ownership"),
    }));
    assert!(layout.slides_path("Foundations", "Traits").exists());
}

#[tokio::test]
async fn default_crews_chain_writer_into_reviewer() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|role, inputs| {
        if role.contains("curriculum designer") {
            Ok(OUTLINE.to_string())
        } else if role.contains("content writer") {
            Ok(format!("draft of {}", inputs["lecture_title"]))
        } else if role.contains("technical editor") {
            Ok(format!("reviewed {}", inputs[PREVIOUS_OUTPUT_KEY]))
        } else {
            Ok("deck".to_string())
        }
    });
    let pipeline = CoursePipeline::new(generator.clone());

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    assert!(matches!(run.outcome, CourseOutcome::Completed(_)));
    assert_eq!(
        read(temp.path().join("lectures/Foundations/Ownership.md")),
        "reviewed draft of Ownership"
    );
}

#[tokio::test]
async fn batch_regenerates_slides_from_lecture_files() {
    let temp = TempDir::new().unwrap();
    let layout = OutputLayout::new(temp.path());
    let lectures = layout.lectures_root();
    crate::output::write_file(lectures.join("Section_1_Intro"), "1_What_is_it.md", "intro body").unwrap();
    crate::output::write_file(lectures.join("Section_1_Intro"), "notes.txt", "ignored").unwrap();
    crate::output::write_file(lectures.join("Section_2_Deep"), "Empty_Deck.md", "deep body").unwrap();

    let generator = ScriptedGenerator::new(|_, inputs| {
        if inputs["lecture_title"] == "Empty Deck" {
            Ok(" ".to_string())
        } else {
            Ok(format!("deck for {}", inputs["lecture_title"]))
        }
    });

    let report = regenerate_slides(generator.as_ref(), &single("slides"), &layout, "beginners")
        .await
        .unwrap();

    let generated = layout.slides_root().join("Section_1_Intro/1_What_is_it.md");
    assert_eq!(report.generated, vec![generated.clone()]);
    assert_eq!(
        report.skipped,
        vec![lectures.join("Section_2_Deep/Empty_Deck.md")]
    );
    assert_eq!(read(&generated), "deck for 1 What is it");

    let calls = generator.calls_for("slides");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["lecture_objective"], "Understand 1 What is it");
    assert_eq!(calls[0]["section_description"], "Section 1 Intro");
    assert_eq!(calls[0]["audience_level"], "beginners");
    assert_eq!(calls[0]["lecture_content"], "intro body");
}

#[tokio::test]
async fn batch_requires_lectures_directory() {
    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|_, _| Ok("deck".to_string()));

    let err = regenerate_slides(
        generator.as_ref(),
        &single("slides"),
        &OutputLayout::new(temp.path()),
        "anyone",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PipelineError::Io { .. }));
}

#[test]
fn course_inputs_load_from_partial_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("course.json");
    std::fs::write(
        &path,
        r#"{"course_title": "Rust", "description_points": ["a", "b"]}"#,
    )
    .unwrap();

    let inputs = CourseInputs::from_json_file(&path).unwrap();
    assert_eq!(inputs.course_title, "Rust");
    assert_eq!(inputs.description_points, vec!["a", "b"]);
    assert!(inputs.target_audience.is_empty());
}

#[tokio::test]
async fn crew_file_overrides_only_the_crews_it_names() {
    let file = CrewFile {
        content: single("writer").steps,
        ..CrewFile::default()
    };
    let crews = CourseCrews::default().with_overrides(file);
    assert_eq!(crews.design, CrewSpec::course_design());
    assert_eq!(crews.slides, CrewSpec::slides());
    assert_eq!(crews.content.name, "lecture content");
    assert_eq!(crews.content.steps.len(), 1);

    let temp = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|role, inputs| {
        if role.contains("curriculum designer") {
            Ok(OUTLINE.to_string())
        } else if role == "writer" {
            Ok(format!("single pass {}", inputs["lecture_title"]))
        } else {
            Ok("deck".to_string())
        }
    });
    let pipeline = CoursePipeline::with_crews(generator.clone(), crews);

    let run = pipeline
        .run(course_inputs(), OutputLayout::new(temp.path()))
        .await;

    assert!(matches!(run.outcome, CourseOutcome::Completed(_)));
    assert_eq!(
        read(temp.path().join("lectures/Foundations/Traits.md")),
        "single pass Traits"
    );
    assert_eq!(generator.calls_for("writer").len(), 3);
}
