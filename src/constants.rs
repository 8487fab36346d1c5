/// Viewer tuning constants.
///
/// These express the intended look and feel of the viewer (camera defaults,
/// control speeds, idle timing, pass parameters) and keep magic numbers out
/// of the interaction and render code.

// Camera
pub const CAMERA_FOV_DEG: f32 = 65.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 1.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

// User-set FOV bounds (degrees, inclusive)
pub const FOV_MIN_DEG: f32 = 10.0;
pub const FOV_MAX_DEG: f32 = 100.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.06; // lower is smoother
pub const ORBIT_ROTATE_SPEED: f32 = 0.5;
pub const ORBIT_PAN_SPEED: f32 = 0.5;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // dolly factor per wheel step at speed 1
pub const ORBIT_POLAR_EPS: f32 = 1e-6;

// Camera reset animation
pub const RESET_DURATION_SEC: f32 = 1.5;

// Idle / attract mode
pub const IDLE_TIME_LIMIT_MS: u64 = 8_000;
pub const IDLE_COUNTDOWN_SECS: u32 = 5;
pub const IDLE_COUNTDOWN_TICK_MS: u64 = 1_000;
pub const IDLE_FOV_DEG: f32 = 20.0;
pub const IDLE_SWEEP_RATE_PER_MS: f64 = 0.0001;
pub const IDLE_SWEEP_AMPLITUDE: f32 = 0.1;

// Selection label
pub const LABEL_OFFSET_PX: [f32; 2] = [10.0, -30.0];
pub const LABEL_FADE_MS: i32 = 300;

// Model placement and camera bounds
pub const MODEL_PATH: &str = "assets/scene.glb";
pub const MODEL_OFFSET: [f32; 3] = [-0.3, -1.0, -3.0];
pub const BOUNDS_MARGIN: f32 = 0.5;

// Render layers
pub const DEFAULT_LAYER: u8 = 0;
pub const ORIGIN_LAYER: u8 = 1;

// Lighting and tone mapping
pub const LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const AMBIENT_INTENSITY: f32 = 0.15;
pub const TONE_MAPPING_EXPOSURE: f32 = 3.0;
pub const CLEAR_COLOR_SRGB: [f32; 3] = [0x11 as f32 / 255.0, 0x11 as f32 / 255.0, 0x11 as f32 / 255.0];
pub const DEFAULT_BASE_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

// Outline pass
pub const OUTLINE_EDGE_STRENGTH: f32 = 100.0;
pub const OUTLINE_THICKNESS_PX: f32 = 1.0;
pub const OUTLINE_COLOR: [f32; 3] = [1.0, 0.0, 0.0]; // #FF0000, visible and hidden edges

// Vignette pass
pub const VIGNETTE_OFFSET: f32 = 1.0;
pub const VIGNETTE_DARKNESS: f32 = 1.1;

// Color correction (neutral values)
pub const BRIGHTNESS_NEUTRAL: f32 = 0.0;
pub const CONTRAST_NEUTRAL: f32 = 1.0;

// Origin markers
pub const MARKER_FILL_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const MARKER_FILL_SIZE: f32 = 0.06;
pub const MARKER_OUTLINE_COLOR: [f32; 3] = [0xfc as f32 / 255.0, 0x20 as f32 / 255.0, 0.0];
pub const MARKER_OUTLINE_SIZE: f32 = 0.04;
pub const MARKER_OUTLINE_OFFSET: [f32; 3] = [0.0, 0.0, -0.001];

// Showcase preset
pub const SHOWCASE_FOV_DEG: f32 = 45.0;
pub const SHOWCASE_IDLE_TIME_LIMIT_MS: u64 = 15_000;
