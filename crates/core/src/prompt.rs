pub static QUESTION_PROMPT: &str = r#"Based on the provided educational content, generate exactly 20 medium difficulty multiple choice questions suitable for IIT JEE aspirants. Follow this EXACT format:

Q.{number} {question_text}\

A)  {option_1}\
B)  {option_2}\
C)  {option_3}\
D)  {option_4}\

Answer: {correct_option}\

Solution: {solution_text}\

FORMATTING REQUIREMENTS:
1. Each line MUST end with \
2. Use capital letters A), B), C), D) for options with two spaces after the parenthesis
3. Mathematical expressions should use $ symbols for KaTeX formatting (e.g., $x^2$, $\frac{1}{2}$)
4. Variables should be italicized with asterisks (e.g., *v* for velocity, *F* for force)
5. Answer format: "Answer: X\" where X is the correct option letter
6. Solution should be clear and educational
7. Questions should cover key physics/chemistry/mathematics concepts
8. Maintain consistent spacing and formatting

Example format:
Q.1 Two strings of copper are stretched to the same tension. If their cross-section areas are in the ratio $1:4$, then respective wave velocities will be:\

A)  $4:1$\
B)  $2:1$\
C)  $1:2$\
D)  $1:4$\

Answer: C\

Solution: Wave velocity in a string is given by $v = \sqrt{\frac{T}{\mu}}$ where $T$ is tension and $\mu$ is linear mass density. Since $\mu = \frac{m}{l} = \frac{\rho A l}{l} = \rho A$, we have $v \propto \frac{1}{\sqrt{A}}$. Therefore, $\frac{v_1}{v_2} = \sqrt{\frac{A_2}{A_1}} = \sqrt{\frac{4}{1}} = \frac{2}{1} = 1:2$.\

Generate 20 questions following this exact format."#;

/// Transcript text followed by the question template, separated by one space.
pub fn build_prompt(transcript: &str) -> String {
    format!("{} {}", transcript, QUESTION_PROMPT)
}
