/// Shared vertex stage: world-space position and normal, texture coordinate
/// passthrough.
pub const LIT_VERTEX: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aNormal;
layout (location = 2) in vec2 aTexCoord;

out vec3 FragPos;
out vec3 Normal;
out vec2 TexCoord;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main() {
    FragPos = vec3(model * vec4(aPos, 1.0));
    Normal = mat3(transpose(inverse(model))) * aNormal;
    TexCoord = aTexCoord;
    gl_Position = projection * view * vec4(FragPos, 1.0);
}
"#;

/// Phong-lit flat color used by the renderer's default program.
pub const DEFAULT_FRAGMENT: &str = r#"
#version 330 core
out vec4 FragColor;

in vec3 FragPos;
in vec3 Normal;
in vec2 TexCoord;

uniform vec3 viewPos;
uniform vec3 objectColor;
uniform vec3 lightPos;
uniform vec3 lightColor;
uniform float shininess;
uniform float time;

void main() {
    vec3 ambient = 0.3 * lightColor;

    vec3 norm = normalize(Normal);
    vec3 lightDir = normalize(lightPos - FragPos);
    vec3 diffuse = max(dot(norm, lightDir), 0.0) * lightColor;

    vec3 viewDir = normalize(viewPos - FragPos);
    vec3 reflectDir = reflect(-lightDir, norm);
    float spec = pow(max(dot(viewDir, reflectDir), 0.0), shininess);
    vec3 specular = 0.5 * spec * lightColor;

    vec3 result = (ambient + diffuse + specular) * objectColor;

    // Bright objects shimmer over time.
    if (objectColor.r > 0.8 && objectColor.g > 0.8) {
        result += vec3(sin(time * 2.0 + FragPos.x * 5.0) * 0.2,
                       cos(time * 2.0 + FragPos.z * 5.0) * 0.2, 0.0);
    }

    FragColor = vec4(result, 1.0);
}
"#;

/// Ground plane: lit anti-aliased grid, ten cells per texture unit.
pub const GROUND_FRAGMENT: &str = r#"
#version 330 core
out vec4 FragColor;

in vec3 FragPos;
in vec3 Normal;
in vec2 TexCoord;

uniform vec3 viewPos;
uniform vec3 lightPos;
uniform vec3 lightColor;
uniform float shininess;

void main() {
    vec3 ambient = 0.4 * lightColor;

    vec3 norm = normalize(Normal);
    vec3 lightDir = normalize(lightPos - FragPos);
    vec3 diffuse = max(dot(norm, lightDir), 0.0) * lightColor;

    vec3 viewDir = normalize(viewPos - FragPos);
    vec3 reflectDir = reflect(-lightDir, norm);
    float spec = pow(max(dot(viewDir, reflectDir), 0.0), shininess);
    vec3 specular = 0.3 * spec * lightColor;

    vec2 cell = TexCoord * 10.0;
    vec2 grid = abs(fract(cell - 0.5) - 0.5) / fwidth(cell);
    float line = min(grid.x, grid.y);
    vec3 gridColor = mix(vec3(0.2, 0.2, 0.25), vec3(0.3, 0.3, 0.35), smoothstep(0.0, 1.0, line));

    FragColor = vec4((ambient + diffuse + specular) * gridColor, 1.0);
}
"#;

/// Pickups: strong specular with a time-varying glow tint.
pub const PICKUP_FRAGMENT: &str = r#"
#version 330 core
out vec4 FragColor;

in vec3 FragPos;
in vec3 Normal;
in vec2 TexCoord;

uniform vec3 viewPos;
uniform vec3 lightPos;
uniform vec3 lightColor;
uniform float shininess;
uniform float time;

void main() {
    vec3 ambient = 0.5 * lightColor;

    vec3 norm = normalize(Normal);
    vec3 lightDir = normalize(lightPos - FragPos);
    vec3 diffuse = max(dot(norm, lightDir), 0.0) * lightColor;

    vec3 viewDir = normalize(viewPos - FragPos);
    vec3 reflectDir = reflect(-lightDir, norm);
    float spec = pow(max(dot(viewDir, reflectDir), 0.0), shininess);
    vec3 specular = spec * lightColor;

    vec3 glow = vec3(0.8 + sin(time * 3.0 + FragPos.x * 10.0) * 0.2,
                     0.9 + cos(time * 2.5 + FragPos.z * 10.0) * 0.1,
                     1.0);

    FragColor = vec4((ambient + diffuse * 1.5 + specular * 2.0) * glow, 1.0);
}
"#;
