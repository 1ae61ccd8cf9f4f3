use anyhow::{bail, Result};
use intervu_core::access::{self, AccessDecision};
use intervu_core::interview::{
    FlowSnapshot, FlowTiming, InterviewFlowController, InterviewPhase, InterviewSetup,
    RecorderTiming, ResponseRecorder,
};
use intervu_core::results::ReportRepository;
use intervu_infrastructure::question_bank::MAX_TOPICS;
use intervu_infrastructure::report_repository::demo_report;
use intervu_infrastructure::{transcript, QuestionBank, SeededReportRepository};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{auth, results};

const LIVE_INTERVIEW_LOCATION: &str = "/interview/live";

pub async fn run(role: &str, level: &str, topics: Vec<String>, budget: Option<u32>) -> Result<()> {
    if topics.len() > MAX_TOPICS {
        bail!("At most {} topics can be selected", MAX_TOPICS);
    }

    let manager = auth::session_manager()?;
    let state = manager.bootstrap().await;
    match access::evaluate(&state, LIVE_INTERVIEW_LOCATION) {
        AccessDecision::Allow => {}
        AccessDecision::Deny {
            redirect_to,
            remember,
        } => {
            println!("🔒 Sign in required, redirecting to {}", redirect_to);
            bail!(
                "Not signed in. Try: intervu login alex@example.com password123 --continue-to {}",
                remember
            );
        }
        AccessDecision::Pending => bail!("Session state is still resolving, try again"),
    }

    let bank = QuestionBank::new();
    let topics = if topics.is_empty() {
        // No explicit selection: take the role's topic catalog.
        bank.topics_for(role)
    } else {
        topics
    };
    println!("📚 Topics: {}", topics.join(", "));

    let setup = InterviewSetup {
        role: role.to_string(),
        experience_level: level.to_string(),
        topics,
        duration_minutes: 30,
    };
    let plan = bank.plan_for(&setup, budget)?;
    let interview_id = plan.interview_id.clone();

    let recorder = ResponseRecorder::new(transcript::demo_fragments(), RecorderTiming::default());
    let ctrl = InterviewFlowController::new(plan, FlowTiming::default(), recorder)?;

    println!("🎤 {} interview, {} level", setup.role, setup.experience_level);
    println!("   Commands: next, prev, record, stop, status, quit");
    println!("⏳ Preparing your interview...");

    // Narrate state changes as they land.
    let mut rx = ctrl.subscribe();
    let narrator = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            print_snapshot(&snapshot);
            if snapshot.completion_id.is_some() {
                return;
            }
        }
    });

    ctrl.start().await;

    let mut done_rx = ctrl.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = done_rx.wait_for(|s| s.completion_id.is_some()) => {
                changed?;
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed; abandon the interview.
                    ctrl.shutdown().await;
                    return Ok(());
                };
                match line.trim() {
                    "next" => ctrl.next().await,
                    "prev" => ctrl.previous().await,
                    "record" => ctrl.start_recording().await,
                    "stop" => ctrl.stop_recording().await,
                    "status" => print_snapshot(&ctrl.snapshot().await),
                    "quit" => {
                        ctrl.shutdown().await;
                        println!("👋 Interview abandoned");
                        return Ok(());
                    }
                    "" => {}
                    other => println!("Unknown command '{}'", other),
                }
            }
        }
    }
    narrator.await.ok();

    println!("🏁 Interview complete: {}", interview_id);
    let reports = SeededReportRepository::with_demo_reports();
    reports.insert(demo_report(&interview_id));
    if let Some(report) = reports.find_by_id(&interview_id).await? {
        results::print_report(&report);
    }
    Ok(())
}

fn print_snapshot(snapshot: &FlowSnapshot) {
    match snapshot.phase {
        InterviewPhase::Loading => println!("⏳ Loading..."),
        InterviewPhase::Thinking { index } => {
            println!(
                "🤔 Thinking... (question {} of {})",
                index + 1,
                snapshot.total_questions
            );
        }
        InterviewPhase::Presenting { index } => {
            if let Some(prompt) = &snapshot.prompt {
                println!(
                    "❓ [{} / {}] {} ({}s left{})",
                    index + 1,
                    snapshot.total_questions,
                    prompt,
                    snapshot.remaining,
                    if snapshot.recording { ", recording" } else { "" }
                );
            }
            if !snapshot.transcript.is_empty() {
                println!("   📝 {}", snapshot.transcript);
            }
        }
        InterviewPhase::Complete => println!("✅ All questions answered"),
    }
}
