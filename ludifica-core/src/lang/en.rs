pub(super) static STRINGS: &[(&str, &str)] = &[
    ("amount", "Amount"),
    ("avatar", "Avatar"),
    ("avatarbust", "Bust"),
    ("avatarbuy", "Buy"),
    ("avatarnotuse", "You can not use this avatar"),
    ("avatarowned", "You already own this avatar"),
    ("avatars", "Avatars"),
    ("avatartype_normal", "Normal"),
    ("avatartype_user", "For a specific user"),
    ("avatarused", "Avatar assigned"),
    ("badges", "Badges"),
    ("benefits", "Benefits"),
    ("blocksettings", "Block settings"),
    ("bought", "Bought"),
    ("cannotchangeprofiletoother", "You cannot change the profile of another user"),
    ("changessaved", "Changes saved"),
    ("coins", "Coins"),
    ("configheader_modules", "Points for completing course modules"),
    ("configmodules_help", "Assign points to the activities that must be considered."),
    ("contacts", "Contacts"),
    ("currentlevel", "Your current level is <strong>{$a}</strong>"),
    ("customtitle", "Custom title"),
    ("deliveredcoins", "Coins delivered"),
    ("dynamic_help-coinsbypoints", "<strong>{$a} coins</strong>."),
    ("dynamic_help-noactivities", "There are no activities that give points in this course."),
    (
        "dynamic_help-pointsbyday",
        "Keep your streak! Once it starts you will earn <strong>{$a} points every day</strong>.",
    ),
    ("dynamic_help-pointsbyendcourse", "Earn <strong>{$a} points</strong> for completing a course."),
    (
        "dynamic_help-pointsbyendcourseduration",
        "Earn <strong>{$a} points</strong> when you complete this course.",
    ),
    (
        "dynamic_help-pointsbyendcourseduration_site",
        "Earn <strong>{$a}*X points</strong> when you complete a course, where <strong>X</strong> is the recommended course duration.",
    ),
    (
        "dynamic_help-pointsbyendmodule",
        "Get <strong>{$a} points</strong> for each resource you complete in this course.",
    ),
    ("dynamic_help-pointsbymodule", "{$a} points"),
    ("dynamic_help-pointsrecurrentlogin", "and earn <strong>{$a} points</strong>."),
    (
        "dynamic_help-pointstocoins",
        "Every time you get <strong>{$a} points</strong> you will be given ",
    ),
    (
        "dynamic_help-recurrentlogindays",
        "Log in for <strong>{$a} days</strong> to start a streak ",
    ),
    ("dynamic_help_title", "Get points for the following criteria"),
    ("dynamichelps", "Help tab"),
    ("edit", "Edit"),
    ("editnickname", "Edit nickname"),
    ("errornotavatardata", "No avatar data"),
    ("errornotticketdata", "No ticket data"),
    ("generalexceptionmessage", "An unexpected error occurred"),
    ("given", "Ticket given"),
    (
        "helptitle_pointsbycoursemodule",
        "This course gives points for completing the following resources:",
    ),
    ("improvecriteria_ncourses", "Completion of N courses"),
    ("improvecriteria_ncourses_label", "Completion of {$a} courses"),
    ("insufficientcoins", "Insufficient coins"),
    ("invalidamount", "The amount must be greater than zero"),
    ("invalidrecord", "Can not find data record in database table"),
    ("invalidusercontact", "The user is not a valid contact"),
    ("labellevel", "Level {$a}"),
    ("levelup", "Level up!"),
    ("maxtickets", "You currently hold the maximum amount of this ticket."),
    ("newblocktitle", "Ludifica"),
    ("newnickname", "New value for {$a}"),
    (
        "nicknameexists",
        "The nickname is already in use by another user, please choose another one.",
    ),
    ("nicknameunasined", "Player {$a}"),
    ("no", "No"),
    ("nopermissions", "Sorry, but you do not currently have permissions to do that"),
    ("notavailable", "Not available to buy."),
    ("notavailabledate", "The date to buy this ticket has passed."),
    ("notbuy", "Error buying"),
    ("notcostcompliance", "Insufficient coins"),
    ("notgive", "Error giving a ticket"),
    ("notgivecoins", "Error delivering the coins"),
    ("nottopyet", "There is no ranking information yet"),
    ("numcoins", "{$a} coins"),
    ("numpoints", "{$a} points"),
    (
        "overcomelevel",
        "Get <strong>{$a->maxpoints} points</strong> to reach level <strong>{$a->name}</strong>.",
    ),
    ("pluginname", "Ludifica"),
    ("requireloginerror", "Login is required"),
    ("ticketnotavailable", "The ticket is no longer available, it may have been used in another session."),
    ("ticketstype_default", "Default"),
    ("ticketused", "Ticket used"),
    ("tabcontacts", "Contacts tab"),
    ("tabcontacts_help", "The user contact information"),
    ("tablastmonth", "Top of the last month tab"),
    ("tabprofile", "Profile tab"),
    ("tabprofile_help", "All tabs are enabled if you choose this option."),
    ("tabtitle_contacts", "Contacts"),
    ("tabtitle_dynamichelps", "Help"),
    ("tabtitle_lastmonth", "Top last month"),
    ("tabtitle_profile", "Profile"),
    ("tabtitle_topbycourse", "Top course"),
    ("tabtitle_topbysite", "Top site"),
    ("tabtopbycourse", "Top by course tab"),
    ("tabtopbysite", "Top by site tab"),
    ("unlimited", "Unlimited"),
    ("userfieldsranking", "Rankings by user fields"),
    (
        "userfieldsranking_help",
        "List of user fields used to show other rankings. Use a comma as separator.",
    ),
    ("yes", "Yes"),
];
