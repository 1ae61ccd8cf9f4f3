use anyhow::Result;
use intervu_core::results::{InterviewReport, ReportRepository};
use intervu_infrastructure::SeededReportRepository;

pub async fn show(interview_id: &str) -> Result<()> {
    let reports = SeededReportRepository::with_demo_reports();
    match reports.find_by_id(interview_id).await? {
        Some(report) => print_report(&report),
        None => {
            println!("🔍 No report found for '{}'", interview_id);
            println!("   The demo ships with one report: intervu results int-1");
        }
    }
    Ok(())
}

pub fn print_report(report: &InterviewReport) {
    println!("📊 {} ({})", report.title, report.date);
    println!("   Overall score: {}/100", report.overall_score);

    println!("\n   Skills:");
    for (skill, score) in &report.skill_scores {
        println!("   - {:<20} {:>3}/100", skill, score);
    }

    println!("\n   Questions:");
    for (i, question) in report.questions.iter().enumerate() {
        println!("   {}. {} ({}/100)", i + 1, question.prompt, question.score);
        println!("      Answer:   {}", question.answer);
        println!("      Feedback: {}", question.feedback);
    }
}
