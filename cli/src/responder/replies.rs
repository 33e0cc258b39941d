//! Canned reply texts for both variants.

use super::{Persona, Variant};

pub const EXPRESSION_APOLOGY: &str =
    "Sorry, I couldn't calculate that. Please check your expression.";
pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero!";
pub const FACTORIAL_TOO_LARGE: &str = "Number too large for factorial calculation";

pub const INTEGRATION_REFERENCE: &str = "For integration problems, I recommend breaking them down step by step:\n\
1. For basic integrals: ∫x dx = x²/2 + C\n\
2. For exponential: ∫eˣ dx = eˣ + C\n\
3. For trigonometric: ∫sin(x) dx = -cos(x) + C\n\
Please specify the function you'd like to integrate.";

pub const DIFFERENTIATION_REFERENCE: &str = "For differentiation problems:\n\
1. Power rule: d/dx(xⁿ) = n·xⁿ⁻¹\n\
2. Exponential: d/dx(eˣ) = eˣ\n\
3. Trigonometric: d/dx(sin(x)) = cos(x)\n\
Please specify the function you'd like to differentiate.";

pub const LOGARITHM_REFERENCE: &str = "Logarithm properties:\n\
1. log(xy) = log(x) + log(y)\n\
2. log(x/y) = log(x) - log(y)\n\
3. log(xⁿ) = n·log(x)\n\
Please specify your logarithm question.";

pub const TRIGONOMETRY_REFERENCE: &str = "Trigonometric formulas:\n\
1. sin²(x) + cos²(x) = 1\n\
2. tan(x) = sin(x)/cos(x)\n\
3. sin(A+B) = sin(A)cos(B) + cos(A)sin(B)\n\
Please specify your trigonometry question.";

const THEMED_GREETING: &str = "Hello! I'm your mathematical assistant. I can help with:\n\
- Basic arithmetic\n\
- Integration and differentiation\n\
- Trigonometry\n\
- Logarithms\n\
- And much more!\n\
What would you like to calculate?";

const THEMED_FALLBACK: &str = "I can help you with various mathematical topics including:\n\
1. Basic Arithmetic:\n   \
- Addition, subtraction, multiplication, division\n   \
- Square roots and powers\n   \
- Factorial calculations\n\n\
2. Advanced Mathematics:\n   \
- Integration\n   \
- Differentiation\n   \
- Trigonometry\n   \
- Logarithms\n\n\
Please ask your question, and I'll help you solve it!";

const BASELINE_GREETING: &str =
    "Hello! How can I help you today? You can ask me to perform mathematical calculations!";

const BASELINE_FALLBACK: &str = "I can help you with mathematical calculations! Try asking me to:\n\
- Calculate simple expressions (e.g., '2 + 2')\n\
- Add numbers (e.g., 'add 5 and 3')\n\
- Subtract numbers (e.g., 'subtract 10 from 20')\n\
- Multiply numbers (e.g., 'multiply 4 and 5')\n\
- Divide numbers (e.g., 'divide 10 by 2')\n\
- Find square root (e.g., 'square root of 16')\n\
- Calculate powers (e.g., 'what is 2 squared')";

/// The per-variant small-talk and help texts, with the persona filled in.
#[derive(Debug, Clone)]
pub struct Replies {
    pub creator: String,
    pub name: String,
    pub greeting: &'static str,
    pub status: &'static str,
    pub farewell: &'static str,
    pub thanks: &'static str,
    pub fallback: &'static str,
}

impl Replies {
    pub fn new(variant: Variant, persona: &Persona) -> Self {
        let creator = format!("{} created me", persona.creator);
        match variant {
            Variant::Themed => Self {
                creator,
                name: format!("I'm {}, your mathematical genius assistant!", persona.name),
                greeting: THEMED_GREETING,
                status: "I'm doing well, thank you for asking! Ready to solve some math problems!",
                farewell: "Goodbye! Remember, math is beautiful!",
                thanks: "You're welcome! Math is my passion, and I'm happy to help!",
                fallback: THEMED_FALLBACK,
            },
            Variant::Baseline => Self {
                creator,
                name: format!(
                    "I'm {}, your friendly chat assistant! I'm great at math!",
                    persona.name
                ),
                greeting: BASELINE_GREETING,
                status: "I'm doing well, thank you for asking! I can help you with math problems!",
                farewell: "Goodbye! Have a great day!",
                thanks: "You're welcome! Let me know if you need help with more calculations!",
                fallback: BASELINE_FALLBACK,
            },
        }
    }
}
