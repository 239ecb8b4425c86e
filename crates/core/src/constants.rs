//! Fixed reply texts and rendering limits.
//!
//! Hosts render these verbatim, so the markdown markers and emoji are part of the contract.

/// Number of symptoms shown in a condition report.
pub const MAX_SYMPTOMS_SHOWN: usize = 4;

/// Reply to empty or whitespace-only input.
pub const EMPTY_INPUT_PROMPT: &str =
    "Please describe your child's symptoms so I can help you better.";

/// Reply when no rule matches the input.
pub const NO_MATCH_GUIDANCE: &str = "I couldn't identify a specific condition from your description. Please provide more details about:

• **Specific symptoms** (cough, fever, breathing difficulty, etc.)
• **Duration** of symptoms
• **Child's age**
• **Any triggers** you've noticed

**Remember:** This is for informational purposes only. Always consult with a pediatrician for proper medical evaluation.";

/// Appended to every condition report.
pub const REPORT_DISCLAIMER: &str = "---
**⚠️ IMPORTANT DISCLAIMER:**
- This is for educational purposes only
- Always consult a pediatrician for proper diagnosis
- If symptoms worsen or red flags appear, seek immediate medical attention
- Call emergency services if your child has severe breathing difficulty";

/// Prefix of the reply produced when an internal failure is absorbed.
pub const APOLOGY_PREFIX: &str = "I encountered an error processing your request. Please try rephrasing your question or consult a healthcare provider. Error: ";

pub(crate) const REPORT_HEADER_PREFIX: &str = "## 🩺 **Possible Condition: ";
pub(crate) const DEFINITION_HEADING: &str = "**📋 Definition:**";
pub(crate) const SYMPTOMS_HEADING: &str = "**🔍 Common Symptoms:**";
pub(crate) const RED_FLAGS_HEADING: &str =
    "**🚨 RED FLAGS - Seek URGENT Medical Care if you notice:**";
pub(crate) const ADVICE_HEADING: &str = "**💡 General Advice:**";
pub(crate) const BULLET: &str = "• ";
pub(crate) const URGENT_BULLET: &str = "• ⚠️ ";
