pub const WEIGHT_UPDATED: &str = "✅ **Weight Updated!**

I've updated your weight in your profile.

This will help me create more personalized workout plans and track your progress better. Would you like me to update any other information or create a new workout plan based on your updated stats?";

pub const HEIGHT_UPDATED: &str = "✅ **Height Updated!**

I've updated your height in your profile.

This helps me create more accurate fitness recommendations. Would you like me to update any other information?";

pub const AGE_UPDATED: &str = "✅ **Age Updated!**

I've updated your age in your profile.

This helps me create age-appropriate workout plans. Would you like me to create a new workout plan based on your updated profile?";

pub const GOALS_UPDATED: &str = "✅ **Fitness Goals Updated!**

I've updated your fitness goals in your profile.

Based on your new goals, I can create personalized workout plans that will help you achieve them. Would you like me to create a new workout plan tailored to these goals?";

pub const PROFILE_HELP: &str = "✅ **Profile Update**

I can help you update your fitness profile! What would you like to change?

**Available Updates:**
• Weight (e.g., \"My weight is 165 lbs\")
• Height (e.g., \"I'm 5'8\" tall\")
• Age (e.g., \"I'm 28 years old\")
• Goals (e.g., \"I want to lose weight and build muscle\")

Just tell me what you'd like to update!";

pub const NUTRITION_TIPS: &str = "**Nutrition Tips for Your Fitness Goals**

Here are some key nutrition principles:

**Protein**: Aim for 0.8-1.2g per pound of body weight
**Carbs**: 45-65% of daily calories for energy
**Fats**: 20-35% of daily calories for hormone health

**Meal Timing:**
• **Pre-workout**: Light meal 2-3 hours before
• **Post-workout**: Protein + carbs within 30 minutes
• **Hydration**: 8-12 cups of water daily

**Healthy Food Choices:**
• Lean proteins: chicken, fish, eggs, tofu
• Complex carbs: oats, brown rice, sweet potatoes
• Healthy fats: avocados, nuts, olive oil
• Vegetables: aim for 5+ servings daily

Would you like me to create a meal plan or help with specific nutrition questions?";

pub const SUPPORT_LOW_MOOD: &str = "💙 **I hear you, and it's okay to feel this way.**

Your feelings are valid, and taking care of yourself right now is the most important thing. Here are some gentle ways to support yourself:

**Gentle Movement Options:**
• Take a slow, mindful walk outside (even 5 minutes helps)
• Try some gentle stretching or yoga
• Dance to your favorite music in your room

**Self-Care Ideas:**
• Take a warm bath or shower
• Listen to calming music
• Write down your thoughts in a journal
• Call a friend or family member

**Remember:** Movement can lift your mood, but it's also perfectly okay to rest when you need it. Start with something small. Even standing up and stretching counts.

Would you like me to create a very gentle, mood-boosting workout, or would you prefer to talk about something else?";

pub const SUPPORT_ANXIETY: &str = "🌸 **I understand anxiety can be really overwhelming.**

Let's focus on some calming techniques that can help:

**Immediate Calming Exercises:**
• **4-7-8 Breathing**: Inhale for 4, hold for 7, exhale for 8
• **Progressive Muscle Relaxation**: Tense and release each muscle group
• **5-4-3-2-1 Grounding**: Name 5 things you see, 4 you feel, 3 you hear, 2 you smell, 1 you taste

**Gentle Movement for Anxiety:**
• Slow, mindful walking
• Gentle yoga or stretching
• Tai chi movements
• Swimming (if available)

**Remember:** Start gently. Even 10 minutes of movement can help reduce stress.

Would you like me to create a calming, low-intensity workout designed specifically for stress relief?";

pub const SUPPORT_FATIGUE: &str = "😴 **It sounds like you're really tired, and that's completely normal.**

Sometimes our bodies need rest more than they need intense exercise. Here are some options:

**If You Want Gentle Movement:**
• Light stretching while sitting or lying down
• Slow walking around your home
• Gentle chair exercises
• Deep breathing exercises

**If You Need Rest:**
• Listen to your body, rest is just as important as exercise
• Focus on good sleep hygiene
• Stay hydrated and eat nourishing foods
• Be kind to yourself, you don't have to push through exhaustion

**Remember:** Rest days are essential for progress. Your body needs time to recover and rebuild.

Would you like me to create a very gentle, energy-conserving routine, or would you prefer to focus on recovery strategies?";

pub const SUPPORT_DISCOURAGED: &str = "🤗 **I want you to know that it's okay to feel this way.**

Everyone has moments when they feel like they can't or don't want to continue. This doesn't mean you've failed. It means you're human.

**Let's take a step back:**
• What's making you feel this way right now?
• Are you being too hard on yourself?
• What would help you feel better?

**Remember:** Progress isn't linear. Some days will be harder than others, and that's completely normal. The important thing is that you're here and you're trying.

Would you like to talk about what's going on, or would you prefer a very gentle, no-pressure workout option?";

pub const SUPPORT_GENERAL: &str = "💪 **I'm here to support you on your fitness journey!**

Remember that fitness is about progress, not perfection. Every step you take toward your goals is valuable, no matter how small.

**What would help you most right now?**
• A gentle, beginner-friendly workout
• Tips for getting started
• Motivation and encouragement
• Just someone to talk to

I'm here for whatever you need! 🌟";

pub const DEFAULT_HELP: &str = "I'm here to help you with your fitness journey! 💪

**What can I help you with?**
• **Workout Plans** - \"Give me a workout\" or \"Create a strength training plan\"
• **Profile Updates** - \"My weight is 165 lbs\" or \"I'm 5'8\" tall\"
• **Nutrition Advice** - \"What should I eat?\" or \"Help with meal planning\"
• **Motivation** - \"I'm feeling tired\" or \"I need motivation\"

Just tell me what you'd like to work on!";

pub const GREETING: &str = "Hey! I'm your Peregrine coach. I can help you with workout plans, answer fitness questions, and keep track of your progress. What would you like to work on today?";
