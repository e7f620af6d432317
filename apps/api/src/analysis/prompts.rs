// Prompt templates handed back to the operator for copy-paste into an
// external LLM chat tool. The service never calls an LLM itself.

/// Quality-defect analysis prompt. Replace `{facts}` before returning.
///
/// Occurrence and outflow causes are analyzed separately, every leaf cause
/// gets a unique ID, and every countermeasure must name the ID it treats.
pub const QUALITY_PROMPT_TEMPLATE: &str = r#"# Defect Root-Cause Analysis Request

You are a veteran quality assurance engineer in the manufacturing industry.
Based on the facts provided, separate fact from speculation, run a logical
why-why analysis, and propose countermeasures.

## 1. Event and facts (input from the shop floor)
**[Facts and phenomenon detail]**
{facts}

## 2. Analysis instructions

### Step 1: 4M breakdown and mechanism estimation
From the fact descriptions above, extract and organize the elements related
to the 4M categories (Man, Machine, Material, Method). Then construct a
logical scenario (inductive reasoning) for the physical mechanism by which
the defect occurred.

### Step 2: Why-why analysis (occurrence causes)
Drill into the mechanism by which the defect occurred.
Repeat "why?" at least 3 times (at most 5) until you reach the root cause.

**[Mandatory: leaf IDs]**
- Structure the analysis as a tree.
- **Every leaf cause (root cause) must carry a unique ID (OCC-1, OCC-2, ...).**
- Step 4 links countermeasures back to these IDs.

*Output sketch:*
- Why 1: because X
  - Why 2-1: because Y
     - Why 3-1: because Z **(ID: OCC-1)**

### Step 3: Why-why analysis (outflow causes)
Analyze why the defect was not detected and removed in-process and instead
flowed out to the following process (or the customer).

**[Mandatory: leaf IDs]**
- **Every leaf cause (root cause) must carry a unique ID (OUT-1, OUT-2, ...).**

*Output sketch:*
- Why 1: inspection missed it
  - Why 2-1: the criterion was ambiguous
     - Why 3-1: the limit sample was outdated **(ID: OUT-1)**

### Step 4: Countermeasures (linking required)
For the identified root causes, propose **occurrence countermeasures and
outflow countermeasures separately**.
**[Most important] State explicitly which root-cause ID from Step 2/3 each
countermeasure treats.**

#### Output format:
**[A. Occurrence countermeasures]**
1. **Measure**: (describe the concrete measure here)
   - **Target ID**: (e.g. OCC-1)
   - **Class**: permanent / interim

**[B. Outflow countermeasures]**
1. **Measure**: (describe the concrete measure here)
   - **Target ID**: (e.g. OUT-1)
   - **Class**: permanent / interim

Format the output as readable Markdown.
"#;

/// Workplace-safety analysis prompt. Replace `{facts}` before returning.
///
/// Splits causes into human factors (behavioral, managerial) and equipment
/// factors (defect, managerial) so countermeasures do not stop at
/// individual blame.
pub const SAFETY_PROMPT_TEMPLATE: &str = r#"# Occupational Safety Incident Analysis Request

You are a veteran occupational health and safety consultant.
Based on the facts provided, identify the unsafe acts and unsafe conditions,
run a logical why-why analysis, and propose countermeasures.

## 1. Event and facts (input from the shop floor)
**[Facts and phenomenon detail]**
{facts}

## 2. Analysis instructions

### Step 1: Classify the unsafe factors (human and equipment)
From the fact descriptions above, extract and organize the elements related
to the four factor classes below. Then construct the mechanism by which the
incident (or near-miss) came about.

- **Human factor A (work behavior):** awkward posture, shortcut behavior, missing protective equipment, skipped checks
- **Human factor B (work management):** insufficient training, wrong instructions, unsuitable staffing, schedule pressure
- **Equipment factor C (equipment defects):** missing guard, deterioration, broken switch, obstacles in walkways
- **Equipment factor D (equipment management):** skipped inspections, repairs left pending, poor layout, environment (lighting, noise)

### Step 2: Why-why analysis (human factors)
Drill into "why was that action taken?" and "why was the management
insufficient?". Repeat "why?" at least 3 times until you reach the root cause.

**[Mandatory: leaf IDs]**
- Structure the analysis as a tree.
- **Every leaf cause (root cause) must carry a unique ID (HUM-1, HUM-2, ...).**

### Step 3: Why-why analysis (equipment factors)
Analyze "why was the equipment deficient?" and "why did management not
catch it?".

**[Mandatory: leaf IDs]**
- **Every leaf cause (root cause) must carry a unique ID (EQP-1, EQP-2, ...).**

### Step 4: Countermeasures (linking required)
For the identified root causes, propose countermeasures in the four
categories below.
**[Most important] State explicitly which root-cause ID each countermeasure
treats.**

#### Output format:
**[1. Human factors: work behavior]** (Target ID: HUM-n)
**[2. Human factors: work management]** (Target ID: HUM-n)
**[3. Equipment factors: equipment defects]** (Target ID: EQP-n)
**[4. Equipment factors: equipment management]** (Target ID: EQP-n)

Split every countermeasure into "interim (immediate action)" and
"permanent (process improvement)".

Format the output as readable Markdown.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_template_has_exactly_one_facts_placeholder() {
        assert_eq!(QUALITY_PROMPT_TEMPLATE.matches("{facts}").count(), 1);
    }

    #[test]
    fn test_safety_template_has_exactly_one_facts_placeholder() {
        assert_eq!(SAFETY_PROMPT_TEMPLATE.matches("{facts}").count(), 1);
    }

    #[test]
    fn test_quality_template_separates_occurrence_and_outflow() {
        assert!(QUALITY_PROMPT_TEMPLATE.contains("occurrence causes"));
        assert!(QUALITY_PROMPT_TEMPLATE.contains("outflow causes"));
        assert!(QUALITY_PROMPT_TEMPLATE.contains("OCC-1"));
        assert!(QUALITY_PROMPT_TEMPLATE.contains("OUT-1"));
        assert!(QUALITY_PROMPT_TEMPLATE.contains("Man, Machine, Material, Method"));
    }

    #[test]
    fn test_safety_template_covers_all_four_factor_classes() {
        assert!(SAFETY_PROMPT_TEMPLATE.contains("work behavior"));
        assert!(SAFETY_PROMPT_TEMPLATE.contains("work management"));
        assert!(SAFETY_PROMPT_TEMPLATE.contains("equipment defects"));
        assert!(SAFETY_PROMPT_TEMPLATE.contains("equipment management"));
        assert!(SAFETY_PROMPT_TEMPLATE.contains("HUM-1"));
        assert!(SAFETY_PROMPT_TEMPLATE.contains("EQP-1"));
    }

    #[test]
    fn test_substitution_leaves_no_placeholder() {
        let prompt = QUALITY_PROMPT_TEMPLATE.replace("{facts}", "- a fact");
        assert!(!prompt.contains("{facts}"));
        assert!(prompt.contains("- a fact"));
    }
}
