//! Advisory responder: keyword-routed answers over a scan result.
//!
//! This is a canned-response table, not a model. It stays outside the
//! scanning engine as a pure `(result, question) -> text` function so the
//! engine never depends on it.

use crate::models::rule::Impact;
use crate::models::ScanResult;

/// Opening line summarizing a fresh result.
pub fn greeting(result: &ScanResult) -> String {
    format!(
        "Hello! I've analyzed your code and found {} issues with an overall score of {}/10. How can I help you improve your code today?",
        result.findings.len(),
        result.score
    )
}

/// Answer `question` against `result`. Routing is keyword-based and checked
/// in a fixed order; the first matching topic wins.
pub fn respond(result: Option<&ScanResult>, question: &str) -> String {
    let q = question.to_lowercase();

    let Some(res) = result else {
        return "Please analyze your code first so I can provide specific recommendations based on your code.".to_string();
    };

    if q.contains("critical") || q.contains("important") || q.contains("urgent") {
        let critical: Vec<String> = res
            .findings
            .iter()
            .filter(|f| f.impact == Impact::High)
            .map(|f| format!("• {} (Line {})", f.message, f.line))
            .collect();
        if !critical.is_empty() {
            return format!(
                "I found {} critical issue(s) in your code:\n\n{}\n\nThese should be addressed immediately as they could cause security vulnerabilities or runtime errors.",
                critical.len(),
                critical.join("\n")
            );
        }
        return "Great news! I didn't find any critical issues in your code. The main areas for improvement are code style and best practices.".to_string();
    }

    if q.contains("security") {
        let security: Vec<String> = res
            .findings
            .iter()
            .filter(|f| f.category == "Security")
            .map(|f| format!("• {}\n  Suggestion: {}", f.message, f.suggestion))
            .collect();
        if !security.is_empty() {
            return format!(
                "I found {} security-related issue(s):\n\n{}\n\nSecurity should always be a top priority. Would you like me to explain any of these in more detail?",
                security.len(),
                security.join("\n\n")
            );
        }
        return format!(
            "Your code looks secure! I didn't find any obvious security vulnerabilities. Your security score is {}/10. Keep following security best practices!",
            res.metrics.security
        );
    }

    if q.contains("performance") || q.contains("optimize") {
        let perf: Vec<String> = res
            .findings
            .iter()
            .filter(|f| f.category == "Performance")
            .map(|f| format!("• {}\n  Suggestion: {}", f.message, f.suggestion))
            .collect();
        if !perf.is_empty() {
            return format!(
                "Here are some performance optimization opportunities:\n\n{}\n\nOptimizing these areas could significantly improve your application's performance.",
                perf.join("\n\n")
            );
        }
        return "Your code looks well-optimized! I didn't find any obvious performance bottlenecks. Consider profiling your application under load to identify any runtime performance issues.".to_string();
    }

    if q.contains("documentation") || q.contains("comment") {
        return format!(
            "Your documentation score is {}/10. Here are some tips to improve it:\n\n• Add JSDoc comments to all functions\n• Explain complex logic with inline comments\n• Document function parameters and return values\n• Add README files for project overview\n• Use meaningful variable and function names\n\nGood documentation makes your code maintainable and helps other developers understand your work.",
            res.metrics.documentation
        );
    }

    if q.contains("best practice") || q.contains("improve") {
        let tips = [
            "Use consistent naming conventions throughout your code",
            "Add error handling for all async operations",
            "Keep functions small and focused on a single responsibility",
            "Use TypeScript for better type safety",
            "Add unit tests to ensure code reliability",
            "Follow the DRY principle (Don't Repeat Yourself)",
            "Use modern JavaScript features like arrow functions and destructuring",
        ];
        let listed: Vec<String> = tips.iter().map(|t| format!("• {}", t)).collect();
        return format!(
            "Here are some best practices to improve your code quality:\n\n{}\n\nYour current maintainability score is {}/10. Implementing these practices will help improve it!",
            listed.join("\n"),
            res.metrics.maintainability
        );
    }

    if q.contains("fix") || q.contains("auto") {
        let fixable: Vec<String> = res
            .findings
            .iter()
            .filter(|f| f.can_auto_fix)
            .map(|f| format!("• {}", f.message))
            .collect();
        if !fixable.is_empty() {
            return format!(
                "I can automatically fix {} issues for you:\n\n{}\n\nRun `revu fix --write` to apply these fixes automatically!",
                fixable.len(),
                fixable.join("\n")
            );
        }
        return "Most of the issues in your code require manual attention, but I can guide you through fixing them step by step. Which specific issue would you like help with?".to_string();
    }

    if q.contains("score") || q.contains("rating") {
        return format!(
            "Your code quality breakdown:\n\n• Overall Score: {}/10\n• Complexity: {}/10\n• Maintainability: {}/10\n• Reliability: {}/10\n• Security: {}/10\n• Documentation: {}/10\n\nThe areas that need the most attention are those with lower scores. Would you like specific advice on improving any of these metrics?",
            res.score,
            res.metrics.complexity,
            res.metrics.maintainability,
            res.metrics.reliability,
            res.metrics.security,
            res.metrics.documentation
        );
    }

    "I'm here to help you improve your code! Based on your analysis, I can assist with:\n\n• Explaining specific issues and how to fix them\n• Security and performance recommendations\n• Code quality best practices\n• Documentation improvements\n\nWhat specific aspect would you like to discuss?".to_string()
}
