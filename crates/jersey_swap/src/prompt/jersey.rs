use crate::types::{JerseyType, NegativeConstraintSet};

const CUSTOM_DESIGN_FIDELITY: &str = "    *   **LITERAL REPLICATION:** You must transfer every single detail from Image B to the player. This design is a unique concept and must be treated as the absolute source of truth. This includes:
        *   The exact manufacturer logo (e.g., retro Adidas trefoil).
        *   The exact team crest.
        *   The exact sponsor logo.
        *   The precise colors.
        *   Any subtle patterns or textures in the fabric (like the stars in the example).
    *   **DO NOT** use your existing knowledge of team jerseys. Replacing the custom design with a different one from your knowledge is a critical failure.";

const OFFICIAL_JERSEY_FIDELITY: &str = "    *   **PERFECT REPLICATION:** You must transfer every single detail from Image B to the player with 100% accuracy. Even though this is an official jersey, the provided image (Image B) is the source of truth for this specific task. Replicate its details exactly, including:
        *   The specific version of the manufacturer logo.
        *   The specific version of the team crest.
        *   The exact sponsor logos and any sleeve patches visible in Image B.
        *   The precise colors and fabric texture from Image B.
    *   **DO NOT** use a generic or different season's version of this jersey from your knowledge base. The goal is to perfectly recreate the jersey shown in Image B on the player in Image A.";

const TASK_FRAMING: &str = "**CRITICAL TASK: PHOTOREALISTIC JERSEY REPLACEMENT**

You are a specialist AI for hyper-realistic apparel visualization. Your task is to take a jersey design (Image B) and make a football player (Image A) appear to be naturally wearing it. The result must be photorealistic and indistinguishable from a real photo.";

const MASKING: &str = "1.  **Jersey Area Identification (Masking):**
    *   Analyze Image A and identify the **entire area** of the jersey currently worn by the player.
    *   This is not a rectangle. The area must precisely follow the contours of the player's body: torso, shoulders, arms, sleeves, and collar. Create a perfect mask of this shape.";

const TEXTURE_MAPPING: &str = "2.  **Texture Mapping & Warping:**
    *   Treat Image B as a flat texture.
    *   Map and warp this texture onto the masked area of the player. The texture must bend, stretch, and deform naturally with the player's pose and the folds of the fabric.";

const LIGHTING: &str = "4.  **Photorealistic Integration (Lighting & Shadows):**
    *   Analyze the lighting (direction, softness, color) in Image A.
    *   Re-apply these lighting conditions to the new jersey.
    *   Re-create the original shadows and fabric folds from Image A onto the new jersey texture to give it volume and realism.
    *   Ensure all other parts of Image A (player's skin, shorts, background) remain completely untouched.";

const FAILURE_CONDITIONS: &str = "**FAILURE CONDITIONS (WHAT TO AVOID):**
-   Pasting a flat, rectangular patch of the jersey image.
-   The new jersey looking like a sticker or an overlay.
-   Ignoring the player's body shape.
-   Using a different jersey (official or otherwise) from your knowledge base.
-   Mismatched lighting or shadows.";

const OUTPUT: &str = "**OUTPUT:** The final, edited image ONLY. No text.";

pub(crate) fn fidelity_clause(jersey_type: JerseyType) -> &'static str {
    match jersey_type {
        JerseyType::CustomDesign => CUSTOM_DESIGN_FIDELITY,
        JerseyType::OfficialJersey => OFFICIAL_JERSEY_FIDELITY,
    }
}

pub(crate) fn user_constraints_clause(constraints: &NegativeConstraintSet) -> Option<String> {
    if constraints.is_empty() {
        return None;
    }
    Some(format!(
        "**USER-DEFINED CONSTRAINTS TO AVOID:**\n- {}",
        constraints.joined()
    ))
}

pub(crate) fn build(jersey_type: JerseyType, constraints: &NegativeConstraintSet) -> String {
    let mut text = String::with_capacity(4096);

    text.push_str(TASK_FRAMING);
    text.push_str("\n\n**INPUTS:**\n");
    text.push_str("- **Image A (Player Photo):** The target image.\n");
    text.push_str("- **Image B (Jersey Design):** The source texture.\n");
    text.push_str(&format!("- **Jersey Type:** {}\n", jersey_type));

    text.push_str("\n**MANDATORY WORKFLOW:**\n\n");
    text.push_str(MASKING);
    text.push_str("\n\n");
    text.push_str(TEXTURE_MAPPING);
    text.push_str("\n\n3.  **Fidelity & Detail Transfer:**\n");
    text.push_str(fidelity_clause(jersey_type));
    text.push_str("\n\n");
    text.push_str(LIGHTING);

    text.push_str("\n\n");
    text.push_str(FAILURE_CONDITIONS);
    if let Some(clause) = user_constraints_clause(constraints) {
        text.push_str("\n\n");
        text.push_str(&clause);
    }

    text.push_str("\n\n");
    text.push_str(OUTPUT);
    text
}
